//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod notifier;
pub mod permission;

// Re-export common types
pub use config::{ConfigEdit, ConfigStore};
pub use notifier::{NotificationError, NotificationService};
pub use permission::{PermissionError, PermissionService};
