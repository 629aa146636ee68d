//! JSON API backend.
//!
//! Endpoints, relative to the configured base URL:
//! - `POST users/login`         -> `{"username", "token"}`
//! - `POST users`               -> `{"message"}`
//! - `GET  users/verify/{token}` -> `{"message"}`
//! - `auth/{provider}` is opened in the browser for social login
//!
//! Any non-2xx response is read as `{"message", "errors"?}`.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::{AuthBackend, AuthError};
use crate::form::{Credentials, FieldError, Session, SignupForm, SocialProvider};

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
    #[serde(default)]
    errors: Vec<FieldError>,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("Invalid API base URL: {base_url}"))?;
        // `Url::join` drops the last path segment unless it ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.base_url
            .join(path)
            .map_err(|e| AuthError::Transport(format!("invalid endpoint {path}: {e}")))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AuthError> {
        let response = request
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "auth request rejected");
            return Err(match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => AuthError::Rejected {
                    message: err.message,
                    errors: err.errors,
                },
                Err(_) => AuthError::rejected(format!("Request failed (HTTP {status})")),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::Transport(format!("invalid response body: {e}")))
    }
}

impl AuthBackend for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let url = self.endpoint("users/login")?;
        self.send(self.client.post(url).json(credentials)).await
    }

    async fn signup(&self, form: &SignupForm) -> Result<String, AuthError> {
        let url = self.endpoint("users")?;
        let response: MessageResponse = self.send(self.client.post(url).json(form)).await?;
        Ok(response.message)
    }

    async fn verify_email(&self, token: &str) -> Result<String, AuthError> {
        let mut url = self.endpoint("users/verify/")?;
        url.path_segments_mut()
            .map_err(|()| AuthError::Transport("base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .push(token);
        let response: MessageResponse = self.send(self.client.get(url)).await?;
        Ok(response.message)
    }

    fn social_auth_url(&self, provider: SocialProvider) -> Result<Url, AuthError> {
        self.endpoint(&format!("auth/{}", provider.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn backend(server: &MockServer) -> HttpBackend {
        HttpBackend::new(&format!("{}/api", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_login_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users/login"))
            .and(body_json(json!({"username": "christian", "password": "123456"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"username": "christian", "token": "jwt"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let session = backend(&server)
            .login(&Credentials::new("christian", "123456"))
            .await
            .unwrap();
        assert_eq!(session.token, "jwt");
    }

    #[tokio::test]
    async fn test_rejection_body_is_parsed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "message": "Signup failed",
                "errors": [{"field": "email", "message": "Email is already registered"}]
            })))
            .mount(&server)
            .await;

        let err = backend(&server)
            .signup(&SignupForm::default())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::Rejected {
                message: "Signup failed".to_string(),
                errors: vec![FieldError::new("email", "Email is already registered")],
            }
        );
    }

    #[tokio::test]
    async fn test_unparseable_error_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users/login"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = backend(&server)
            .login(&Credentials::default())
            .await
            .unwrap_err();
        assert!(err.message().contains("502"));
    }

    #[tokio::test]
    async fn test_verify_email_hits_token_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/verify/tok-123"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Email verified"})),
            )
            .mount(&server)
            .await;

        let message = backend(&server).verify_email("tok-123").await.unwrap();
        assert_eq!(message, "Email verified");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let server = MockServer::start().await;
        let backend = backend(&server);
        drop(server);

        let err = backend.login(&Credentials::default()).await.unwrap_err();
        assert!(matches!(err, AuthError::Transport(_)));
    }

    #[test]
    fn test_social_auth_url_joins_base() {
        let backend =
            HttpBackend::new("https://authors.example/api", Duration::from_secs(1)).unwrap();
        let url = backend.social_auth_url(SocialProvider::Twitter).unwrap();
        assert_eq!(url.as_str(), "https://authors.example/api/auth/twitter");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpBackend::new("not a url", Duration::from_secs(1)).is_err());
    }
}
