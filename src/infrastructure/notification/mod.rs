//! Notification infrastructure module
//!
//! Provides cross-platform notification support using notify-rust (primary),
//! the notify-send tool, or plain terminal output.

mod factory;
mod notify_rust;
mod notify_send;
mod registry;
mod terminal;

pub use factory::{create_notification_service, NotificationBackend, ParseBackendError};
pub use notify_rust::NotifyRustService;
pub use notify_send::NotifySendService;
pub use terminal::TerminalService;
