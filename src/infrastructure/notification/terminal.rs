//! Terminal notification adapter, for headless sessions

use std::io::{self, Write};

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{NotificationError, NotificationService};
use crate::domain::reminder::{NotificationChannel, NotificationId, ReminderNotification};

use super::registry::ChannelRegistry;

/// Writes each notification to stdout as `title: body`
#[derive(Default)]
pub struct TerminalService {
    channels: ChannelRegistry,
}

impl TerminalService {
    pub fn new() -> Self {
        Self::default()
    }

    fn format(notification: &ReminderNotification) -> String {
        format!("{}: {}", notification.title, notification.body)
    }
}

#[async_trait]
impl NotificationService for TerminalService {
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
        debug!(%id, "printing notification");
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", Self::format(notification))
            .and_then(|_| stdout.flush())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))
    }
}
