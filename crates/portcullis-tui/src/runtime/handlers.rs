//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return a `UiEvent`. They perform
//! I/O and never touch state; the runtime spawns them and routes the
//! returned event through the inbox.

use portcullis_core::backend::AuthBackend;
use portcullis_core::session::{self, AuthRequest};
use tokio_util::sync::CancellationToken;

use crate::events::UiEvent;

/// Runs one auth request, stopping early if `cancel` fires.
pub async fn run_auth<B: AuthBackend>(
    backend: B,
    request: AuthRequest,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let Some(cancel) = cancel else {
        return UiEvent::AuthResolved(session::execute(&backend, request).await);
    };

    tokio::select! {
        biased;
        () = cancel.cancelled() => UiEvent::AuthCancelled,
        outcome = session::execute(&backend, request) => UiEvent::AuthResolved(outcome),
    }
}

#[cfg(test)]
mod tests {
    use portcullis_core::action::Action;
    use portcullis_core::backend::MemoryBackend;
    use portcullis_core::config::MemoryUser;
    use portcullis_core::form::Credentials;
    use portcullis_core::session::AuthOutcome;

    use super::*;

    fn backend() -> MemoryBackend {
        MemoryBackend::with_users([MemoryUser {
            username: "christian".to_string(),
            email: "christian@example.com".to_string(),
            password: "123456".to_string(),
        }])
    }

    #[tokio::test]
    async fn test_run_auth_resolves_login() {
        let event = run_auth(
            backend(),
            AuthRequest::Login(Credentials::new("christian", "123456")),
            Some(CancellationToken::new()),
        )
        .await;
        assert!(matches!(
            event,
            UiEvent::AuthResolved(AuthOutcome::Dispatch(Action::LoginSuccess(_)))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();
        let event = run_auth(
            backend(),
            AuthRequest::Login(Credentials::new("christian", "123456")),
            Some(token),
        )
        .await;
        assert!(matches!(event, UiEvent::AuthCancelled));
    }
}
