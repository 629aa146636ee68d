//! In-process backend.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use url::Url;

use super::{AuthBackend, AuthError};
use crate::config::MemoryUser;
use crate::form::{Credentials, EMAIL, FieldError, Session, SignupForm, SocialProvider, USERNAME};

#[derive(Debug, Clone)]
struct Account {
    username: String,
    email: String,
    password: String,
    verified: bool,
}

#[derive(Debug, Default)]
struct Users {
    accounts: Vec<Account>,
    /// Verification token -> username.
    pending: HashMap<String, String>,
}

/// User table kept behind an async lock; clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    users: Arc<RwLock<Users>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the table with already-verified users.
    pub fn with_users(users: impl IntoIterator<Item = MemoryUser>) -> Self {
        let accounts = users
            .into_iter()
            .map(|u| Account {
                username: u.username,
                email: u.email,
                password: u.password,
                verified: true,
            })
            .collect();
        Self {
            users: Arc::new(RwLock::new(Users {
                accounts,
                pending: HashMap::new(),
            })),
        }
    }

}

impl AuthBackend for MemoryBackend {
    async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let users = self.users.read().await;
        let identity = credentials.username.trim();
        let account = users
            .accounts
            .iter()
            .find(|a| a.username == identity || a.email == identity)
            .filter(|a| a.password == credentials.password)
            .ok_or_else(|| AuthError::rejected("Invalid username or password"))?;
        if !account.verified {
            return Err(AuthError::rejected("Verify your email before logging in"));
        }

        Ok(Session {
            username: account.username.clone(),
            token: uuid::Uuid::new_v4().to_string(),
        })
    }

    async fn signup(&self, form: &SignupForm) -> Result<String, AuthError> {
        let mut users = self.users.write().await;

        let mut errors = Vec::new();
        if users.accounts.iter().any(|a| a.username == form.username) {
            errors.push(FieldError::new(USERNAME, "Username is already taken"));
        }
        if users.accounts.iter().any(|a| a.email == form.email) {
            errors.push(FieldError::new(EMAIL, "Email is already registered"));
        }
        if !errors.is_empty() {
            return Err(AuthError::Rejected {
                message: "Signup failed".to_string(),
                errors,
            });
        }

        users.accounts.push(Account {
            username: form.username.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
            verified: false,
        });
        let token = uuid::Uuid::new_v4().to_string();
        users.pending.insert(token.clone(), form.username.clone());
        tracing::info!(username = %form.username, "account created");

        // No mail goes out from this backend, so the token is shown instead.
        Ok(format!(
            "Account created for {}. Verification token: {token}",
            form.email
        ))
    }

    async fn verify_email(&self, token: &str) -> Result<String, AuthError> {
        let mut users = self.users.write().await;
        let username = users
            .pending
            .remove(token)
            .ok_or_else(|| AuthError::rejected("Invalid or expired verification token"))?;
        if let Some(account) = users.accounts.iter_mut().find(|a| a.username == username) {
            account.verified = true;
        }
        Ok("Your email has been verified".to_string())
    }

    fn social_auth_url(&self, provider: SocialProvider) -> Result<Url, AuthError> {
        Err(AuthError::Unavailable(format!(
            "{} login needs the http backend",
            provider.label()
        )))
    }
}
