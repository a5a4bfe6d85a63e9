//! Notification service port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::reminder::{NotificationChannel, NotificationId, ReminderNotification};

/// Notification errors
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("notify-send not found")]
    NotifySendNotFound,

    #[error("Failed to register channel '{channel}': {message}")]
    ChannelFailed { channel: String, message: String },

    #[error("Failed to show notification: {0}")]
    SendFailed(String),
}

/// Port for the platform notification service
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Make sure `channel` exists. Safe to call before every post.
    async fn ensure_channel(&self, channel: &NotificationChannel)
        -> Result<(), NotificationError>;

    /// Post a notification.
    ///
    /// Posting again under the same `id` replaces whatever is still on
    /// display for that id.
    async fn post(
        &self,
        id: NotificationId,
        notification: &ReminderNotification,
    ) -> Result<(), NotificationError>;
}

/// Blanket implementation for boxed notification services
#[async_trait]
impl NotificationService for Box<dyn NotificationService> {
    async fn ensure_channel(
        &self,
        channel: &NotificationChannel,
    ) -> Result<(), NotificationError> {
        self.as_ref().ensure_channel(channel).await
    }

    async fn post(
        &self,
        id: NotificationId,
        notification: &ReminderNotification,
    ) -> Result<(), NotificationError> {
        self.as_ref().post(id, notification).await
    }
}
