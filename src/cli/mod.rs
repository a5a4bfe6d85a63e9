//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the one-shot and interactive screen runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod consent;
pub mod input;
pub mod presenter;
pub mod screen_app;
pub mod screen_cmd;
pub mod signals;

// Re-export commonly used types
pub use app::{run_oneshot, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, ReminderOptions};
pub use presenter::Presenter;
pub use screen_app::run_screen;
