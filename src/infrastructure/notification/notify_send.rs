//! notify-send notification adapter

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{NotificationError, NotificationService};
use crate::domain::config::DEFAULT_APP_NAME;
use crate::domain::reminder::{NotificationChannel, NotificationId, ReminderNotification};

use super::registry::{ChannelRegistry, ServerIds};

/// notify-send notification adapter
pub struct NotifySendService {
    /// Application name for notifications
    app_name: String,
    channels: ChannelRegistry,
    server_ids: ServerIds,
}

impl NotifySendService {
    /// Create a new notify-send service
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

    /// Command line for one post
    fn build_args(
        &self,
        notification: &ReminderNotification,
        channel: &NotificationChannel,
        replaces: Option<u32>,
    ) -> Vec<String> {
        let mut args = vec![
            "--app-name".to_string(),
            self.app_name.clone(),
            "--icon".to_string(),
            notification.icon.clone(),
            "--urgency".to_string(),
            notification.urgency_on(channel).as_str().to_string(),
            "--category".to_string(),
            channel.id.clone(),
            "--print-id".to_string(),
        ];
        if let Some(server_id) = replaces {
            args.push("--replace-id".to_string());
            args.push(server_id.to_string());
        }
        // Everything after this is positional, even a body starting with '-'
        args.push("--".to_string());
        args.push(notification.title.clone());
        args.push(notification.body.clone());
        args
    }
}

impl Default for NotifySendService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationService for NotifySendService {
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

        let args = self.build_args(notification, &channel, self.server_ids.get(id));

        let output = Command::new("notify-send")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NotificationError::NotifySendNotFound
                } else {
                    NotificationError::SendFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            return Err(NotificationError::SendFailed(format!(
                "notify-send exited with status: {}",
                output.status
            )));
        }

        if let Ok(server_id) = String::from_utf8_lossy(&output.stdout).trim().parse::<u32>() {
            self.server_ids.remember(id, server_id);
        }

        Ok(())
    }
}
