//! Email verification command.

use anyhow::{Context, Result};
use portcullis_core::action::Action;
use portcullis_core::backend::Backend;
use portcullis_core::config::{BackendKind, Config};
use portcullis_core::session;
use portcullis_core::store::{Dispatch, Store};

/// Verifies `token` and prints the confirmation the signup form would show.
pub async fn run(config: &Config, token: &str) -> Result<()> {
    // Memory accounts and their tokens live only as long as one TUI session.
    if config.backend == BackendKind::Memory {
        anyhow::bail!(
            "The memory backend keeps accounts inside a single session.\n\
             Paste the token into the signup screen, or use `--backend http`."
        );
    }

    let backend = Backend::from_config(config).context("create backend")?;
    let action = session::run_email_verification(&backend, token).await;
    let failed = matches!(action, Action::EmailVerificationError(_));

    let mut store = Store::new();
    store.dispatch(action);
    let message = &store.state().signup.confirm_message;

    if failed {
        tracing::warn!(%message, "email verification failed");
        anyhow::bail!("{message}");
    }
    tracing::info!("email verified");
    println!("{message}");
    Ok(())
}
