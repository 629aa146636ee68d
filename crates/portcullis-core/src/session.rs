//! Async auth flows.
//!
//! Each flow runs one backend call and resolves to the action that records
//! its outcome. Failures become actions too; nothing here returns `Err`.

use url::Url;

use crate::action::{Action, SignupFailure, StatusMessage};
use crate::backend::{AuthBackend, AuthError};
use crate::form::{Credentials, FormError, SignupForm, SocialProvider};

/// A request handed from the dispatch mapping to whoever runs async work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    Login(Credentials),
    Signup(SignupForm),
    Social(SocialProvider),
    VerifyEmail(String),
}

/// What the runtime should do once a request resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Dispatch(Action),
    OpenBrowser(Url),
}

pub async fn run_login<B: AuthBackend>(backend: &B, credentials: &Credentials) -> Action {
    match backend.login(credentials).await {
        Ok(session) => {
            tracing::info!(username = %session.username, "login succeeded");
            Action::LoginSuccess(session)
        }
        Err(err) => {
            tracing::warn!(error = %err, "login failed");
            Action::LoginFailure(FormError::new(err.to_string()))
        }
    }
}

pub async fn run_signup<B: AuthBackend>(backend: &B, form: &SignupForm) -> Action {
    match backend.signup(form).await {
        Ok(message) => Action::SignupSuccess(StatusMessage { message }),
        Err(err) => {
            tracing::warn!(error = %err, "signup failed");
            let message = err.to_string();
            let errors = match err {
                AuthError::Rejected { errors, .. } if !errors.is_empty() => Some(errors),
                _ => None,
            };
            Action::SignupFailure(SignupFailure { message, errors })
        }
    }
}

pub async fn run_email_verification<B: AuthBackend>(backend: &B, token: &str) -> Action {
    match backend.verify_email(token).await {
        Ok(message) => Action::EmailVerificationSuccess(message),
        Err(err) => Action::EmailVerificationError(err.to_string()),
    }
}

pub fn run_social_auth<B: AuthBackend>(backend: &B, provider: SocialProvider) -> AuthOutcome {
    match backend.social_auth_url(provider) {
        Ok(url) => AuthOutcome::OpenBrowser(url),
        Err(err) => AuthOutcome::Dispatch(Action::LoginFailure(FormError::new(err.to_string()))),
    }
}

pub async fn execute<B: AuthBackend>(backend: &B, request: AuthRequest) -> AuthOutcome {
    match request {
        AuthRequest::Login(credentials) => {
            AuthOutcome::Dispatch(run_login(backend, &credentials).await)
        }
        AuthRequest::Signup(form) => AuthOutcome::Dispatch(run_signup(backend, &form).await),
        AuthRequest::Social(provider) => run_social_auth(backend, provider),
        AuthRequest::VerifyEmail(token) => {
            AuthOutcome::Dispatch(run_email_verification(backend, &token).await)
        }
    }
}
