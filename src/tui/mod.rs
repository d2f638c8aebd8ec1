//! TUI integration layer (crossterm + ratatui).
//!
//! Kept apart from `kernel`/`models` so the interpreter and session run without terminal crates
//! (line mode, tests).

pub mod app;
pub mod screen;
pub mod view;

pub use app::TerminalApp;
pub use screen::{QuitSignal, ScreenGuard, TerminationSignal};
