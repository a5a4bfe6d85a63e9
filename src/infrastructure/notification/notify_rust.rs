//! Cross-platform notification adapter using notify-rust
//!
//! Works on Windows, macOS, and Linux. Urgency, category and in-place
//! replacement are only available on freedesktop systems.

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{NotificationError, NotificationService};
use crate::domain::config::DEFAULT_APP_NAME;
use crate::domain::reminder::{NotificationChannel, NotificationId, ReminderNotification};

use super::registry::{ChannelRegistry, ServerIds};

/// Cross-platform notification service using notify-rust
pub struct NotifyRustService {
    /// Application name for notifications
    app_name: String,
    channels: ChannelRegistry,
    server_ids: ServerIds,
}

impl NotifyRustService {
    /// Create a new notify-rust service
    pub fn new() -> Self {
        Self::with_app_name(DEFAULT_APP_NAME)
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            channels: ChannelRegistry::new(),
            server_ids: ServerIds::new(),
        }
    }
}

impl Default for NotifyRustService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationService for NotifyRustService {
    async fn ensure_channel(
        &self,
        channel: &NotificationChannel,
    ) -> Result<(), NotificationError> {
        if self.channels.register(channel) {
            debug!(channel = %channel.id, "registered notification channel");
        }
        Ok(())
    }

    async fn post(
        &self,
        id: NotificationId,
        notification: &ReminderNotification,
    ) -> Result<(), NotificationError> {
        let channel = self.channels.get(&notification.channel_id).ok_or_else(|| {
            NotificationError::ChannelFailed {
                channel: notification.channel_id.clone(),
                message: "channel was never registered".to_string(),
            }
        })?;

        let app_name = self.app_name.clone();
        let notification = notification.clone();
        let replaces = self.server_ids.get(id);

        // notify-rust operations can block, so run in spawn_blocking
        let server_id = tokio::task::spawn_blocking(move || {
            show(&app_name, &notification, &channel, replaces)
        })
        .await
        .map_err(|e| NotificationError::SendFailed(format!("Task join error: {}", e)))??;

        if let Some(server_id) = server_id {
            self.server_ids.remember(id, server_id);
        }

        Ok(())
    }
}

/// Show the notification, returning the server id where the platform has one
fn show(
    app_name: &str,
    notification: &ReminderNotification,
    channel: &NotificationChannel,
    replaces: Option<u32>,
) -> Result<Option<u32>, NotificationError> {
    let mut builder = notify_rust::Notification::new();
    builder
        .appname(app_name)
        .summary(&notification.title)
        .body(&notification.body)
        .icon(&notification.icon);

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        use crate::domain::reminder::Urgency;
        use notify_rust::Hint;

        let urgency = match notification.urgency_on(channel) {
            Urgency::Low => notify_rust::Urgency::Low,
            Urgency::Normal => notify_rust::Urgency::Normal,
        };
        builder
            .urgency(urgency)
            .hint(Hint::Category(channel.id.clone()));
        if let Some(server_id) = replaces {
            builder.id(server_id);
        }
    }
    #[cfg(not(all(unix, not(target_os = "macos"))))]
    let _ = (channel, replaces);

    let handle = builder
        .show()
        .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

    #[cfg(all(unix, not(target_os = "macos")))]
    let server_id = Some(handle.id());
    #[cfg(not(all(unix, not(target_os = "macos"))))]
    let server_id = {
        let _ = handle;
        None
    };

    Ok(server_id)
}
