//! Interactive login/signup screens.

use anyhow::{Context, Result};
use portcullis_core::backend::Backend;
use portcullis_core::config::Config;
use portcullis_tui::StartView;

pub fn run(config: &Config, start: StartView, next: Option<String>) -> Result<()> {
    let backend = Backend::from_config(config).context("create backend")?;
    portcullis_tui::run_interactive(config, backend, start, next)
}
