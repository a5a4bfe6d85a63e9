//! Application layer - Use cases and port interfaces
//!
//! Contains the permission gate, the notification scheduler, the screen
//! that ties them together, and the trait definitions for external systems.

pub mod permission_gate;
pub mod ports;
pub mod scheduler;
pub mod scope;
pub mod screen;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export use cases
pub use permission_gate::{PermissionGate, PermissionResultHandler};
pub use scheduler::{FireOutcome, NotificationScheduler, ScheduledReminder};
pub use scope::{LifecycleScope, ScopeClosed};
pub use screen::{ReminderScreen, ScreenError, SubmitOutcome};
