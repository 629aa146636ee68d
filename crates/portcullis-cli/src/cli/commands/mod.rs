pub mod config;
pub mod tui;
pub mod verify;
