//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod permission;
pub mod reminder;
pub mod submission;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use permission::{GrantState, PermissionMode, StoredGrant};
pub use reminder::{
    Delay, Draft, NotificationChannel, NotificationId, Priority, ReminderNotification,
    REMINDER_NOTIFICATION_ID,
};
pub use submission::{InvalidStateTransition, Submission, SubmissionState};
