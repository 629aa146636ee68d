//! Shared types and helpers for the TUI.

pub mod task;
pub mod text;

pub use task::*;
pub use text::*;
