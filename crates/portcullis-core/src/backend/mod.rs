//! Authentication backends.
//!
//! `AuthBackend` is the boundary the forms' async requests cross. Two
//! implementations exist:
//! - `MemoryBackend`: in-process user table, seeded from config
//! - `HttpBackend`: JSON API over reqwest
//!
//! `Backend` wraps whichever one the config selects so callers can stay
//! generic over a single concrete type.

pub mod http;
pub mod memory;

use std::fmt;
use std::future::Future;

pub use http::HttpBackend;
pub use memory::MemoryBackend;
use url::Url;

use crate::form::{Credentials, FieldError, Session, SignupForm, SocialProvider};

/// Failure returned by a backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The server understood the request and refused it.
    Rejected {
        message: String,
        errors: Vec<FieldError>,
    },
    /// The request never got a usable response.
    Transport(String),
    /// The backend does not support this operation.
    Unavailable(String),
}

impl AuthError {
    pub fn rejected(message: impl Into<String>) -> Self {
        AuthError::Rejected {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AuthError::Rejected { message, .. }
            | AuthError::Transport(message)
            | AuthError::Unavailable(message) => message,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Rejected { message, .. } => write!(f, "{message}"),
            AuthError::Transport(message) => write!(f, "Network error: {message}"),
            AuthError::Unavailable(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for AuthError {}

pub trait AuthBackend: Send + Sync + 'static {
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Session, AuthError>> + Send;

    /// Creates an account; returns the message to show on success.
    fn signup(&self, form: &SignupForm) -> impl Future<Output = Result<String, AuthError>> + Send;

    fn verify_email(&self, token: &str) -> impl Future<Output = Result<String, AuthError>> + Send;

    /// URL the user is sent to for a social login.
    fn social_auth_url(&self, provider: SocialProvider) -> Result<Url, AuthError>;
}

/// Backend selected at startup.
#[derive(Debug, Clone)]
pub enum Backend {
    Memory(MemoryBackend),
    Http(HttpBackend),
}

impl AuthBackend for Backend {
    async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        match self {
            Backend::Memory(b) => b.login(credentials).await,
            Backend::Http(b) => b.login(credentials).await,
        }
    }

    async fn signup(&self, form: &SignupForm) -> Result<String, AuthError> {
        match self {
            Backend::Memory(b) => b.signup(form).await,
            Backend::Http(b) => b.signup(form).await,
        }
    }

    async fn verify_email(&self, token: &str) -> Result<String, AuthError> {
        match self {
            Backend::Memory(b) => b.verify_email(token).await,
            Backend::Http(b) => b.verify_email(token).await,
        }
    }

    fn social_auth_url(&self, provider: SocialProvider) -> Result<Url, AuthError> {
        match self {
            Backend::Memory(b) => b.social_auth_url(provider),
            Backend::Http(b) => b.social_auth_url(provider),
        }
    }
}

impl Backend {
    /// Builds the backend named in the config.
    pub fn from_config(config: &crate::config::Config) -> anyhow::Result<Self> {
        use crate::config::BackendKind;

        match config.backend {
            BackendKind::Memory => Ok(Backend::Memory(MemoryBackend::with_users(
                config.memory.users.iter().cloned(),
            ))),
            BackendKind::Http => Ok(Backend::Http(HttpBackend::new(
                &config.api.base_url,
                config.api.timeout(),
            )?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthError::Transport("connection refused".to_string()).to_string(),
            "Network error: connection refused"
        );
        assert_eq!(AuthError::rejected("Bad password").to_string(), "Bad password");
        assert_eq!(
            AuthError::Transport("timeout".to_string()).message(),
            "timeout"
        );
    }
}
