//! Full-screen TUI for Portcullis.

pub mod common;
pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;
pub mod views;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use portcullis_core::backend::Backend;
use portcullis_core::config::Config;
pub use runtime::TuiRuntime;
pub use state::StartView;

/// Runs the interactive login/signup loop.
pub fn run_interactive(
    config: &Config,
    backend: Backend,
    start: StartView,
    next_path: Option<String>,
) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The login screen requires a terminal.\n\
             Use `portcullis verify <TOKEN>` for non-interactive use."
        );
    }

    tracing::info!(?start, backend = ?config.backend, "starting tui");
    let mut runtime = TuiRuntime::new(config, backend, start, next_path)?;
    runtime.run()
}
