//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use portcullis_core::config::{self, BackendKind};
use portcullis_core::logging;
use portcullis_tui::StartView;

mod commands;

#[derive(Parser)]
#[command(name = "portcullis")]
#[command(version)]
#[command(about = "Terminal login and signup client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Auth backend to use: memory or http (overrides config)
    #[arg(long, global = true, value_name = "BACKEND")]
    backend: Option<BackendKind>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the login screen (default)
    Login {
        /// Path to go to after a successful login
        #[arg(long, value_name = "PATH")]
        next: Option<String>,
    },
    /// Open the signup screen
    Signup,
    /// Verify an email address with the token from the signup mail
    Verify {
        /// Verification token
        #[arg(value_name = "TOKEN")]
        token: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = config::Config::load().context("load config")?;
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }

    let _log_guard = match logging::init(&config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    tracing::debug!(backend = ?config.backend, "dispatching command");
    match cli.command {
        None => commands::tui::run(&config, StartView::Login, None),
        Some(Commands::Login { next }) => commands::tui::run(&config, StartView::Login, next),
        Some(Commands::Signup) => commands::tui::run(&config, StartView::Signup, None),
        Some(Commands::Verify { token }) => commands::verify::run(&config, &token).await,
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
