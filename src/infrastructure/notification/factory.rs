//! Notification backend selection

use std::fmt;
use std::str::FromStr;

use crate::application::ports::NotificationService;

use super::notify_rust::NotifyRustService;
use super::notify_send::NotifySendService;
use super::terminal::TerminalService;

/// Available notification backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationBackend {
    /// notify-rust library (default)
    #[default]
    NotifyRust,
    /// The notify-send command line tool
    NotifySend,
    /// Print to stdout
    Terminal,
}

impl NotificationBackend {
    pub const VALID: &'static [&'static str] = &["notify-rust", "notify-send", "terminal"];
}

impl fmt::Display for NotificationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationBackend::NotifyRust => write!(f, "notify-rust"),
            NotificationBackend::NotifySend => write!(f, "notify-send"),
            NotificationBackend::Terminal => write!(f, "terminal"),
        }
    }
}

/// Error type for parsing a backend name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBackendError {
    pub value: String,
}

impl fmt::Display for ParseBackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid notification backend '{}'. Valid options: {}",
            self.value,
            NotificationBackend::VALID.join(", ")
        )
    }
}

impl std::error::Error for ParseBackendError {}

impl FromStr for NotificationBackend {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "notify-rust" => Ok(NotificationBackend::NotifyRust),
            "notify-send" => Ok(NotificationBackend::NotifySend),
            "terminal" => Ok(NotificationBackend::Terminal),
            _ => Err(ParseBackendError {
                value: s.to_string(),
            }),
        }
    }
}

/// Create the notification service for `backend`
pub fn create_notification_service(
    backend: NotificationBackend,
    app_name: &str,
) -> Box<dyn NotificationService> {
    match backend {
        NotificationBackend::NotifyRust => Box::new(NotifyRustService::with_app_name(app_name)),
        NotificationBackend::NotifySend => Box::new(NotifySendService::with_app_name(app_name)),
        NotificationBackend::Terminal => Box::new(TerminalService::new()),
    }
}
