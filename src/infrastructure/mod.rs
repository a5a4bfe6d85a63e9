//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the desktop notification server, the config file
//! and the permission prompt.

pub mod config;
pub mod notification;
pub mod permission;

// Re-export adapters
pub use config::XdgConfigStore;
pub use notification::{
    create_notification_service, NotificationBackend, NotifyRustService, NotifySendService,
    TerminalService,
};
pub use permission::{ConsentPermission, ConsentPrompt, NoRuntimePermission};
