//! Raw-mode and alternate-screen handling for the login screens.
//!
//! `enter` and `leave` bracket a session. `TuiRuntime` calls `leave` from
//! `Drop`; the panic hook covers the unwinding path.

use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Switches stdout to raw mode on the alternate screen.
pub fn enter() -> Result<Tui> {
    restore_on_panic();
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Puts the terminal back the way the shell expects it. Safe to repeat.
pub fn leave() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen, Show)
        .context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")
}

/// Chains a hook that leaves the TUI before the default panic output.
/// Installed once per process.
fn restore_on_panic() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = leave();
            previous(info);
        }));
    });
}
