//! Bookkeeping shared by the desktop notification adapters

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::reminder::{NotificationChannel, NotificationId};

/// Channels registered so far, keyed by channel id
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: Mutex<HashMap<String, NotificationChannel>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `channel`. Returns false if it was already known.
    pub fn register(&self, channel: &NotificationChannel) -> bool {
        let mut channels = self.channels.lock().unwrap_or_else(|e| e.into_inner());
        if channels.contains_key(&channel.id) {
            return false;
        }
        channels.insert(channel.id.clone(), channel.clone());
        true
    }

    pub fn get(&self, id: &str) -> Option<NotificationChannel> {
        self.channels
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }
}

/// Maps our logical ids to the ids the notification server handed back,
/// so reposting under the same logical id replaces the visible one
#[derive(Debug, Default)]
pub struct ServerIds {
    ids: Mutex<HashMap<NotificationId, u32>>,
}

impl ServerIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: NotificationId) -> Option<u32> {
        self.ids
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .copied()
    }

    pub fn remember(&self, id: NotificationId, server_id: u32) {
        self.ids
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, server_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent() {
        let registry = ChannelRegistry::new();
        let channel = NotificationChannel::reminders();

        assert!(registry.register(&channel));
        assert!(!registry.register(&channel));
        assert_eq!(registry.get(&channel.id), Some(channel));
    }

    #[test]
    fn unknown_channel_is_none() {
        let registry = ChannelRegistry::new();
        assert!(registry.get("reminder_channel").is_none());
    }

    #[test]
    fn server_ids_overwrite() {
        let ids = ServerIds::new();
        let id = NotificationId(1);

        assert!(ids.get(id).is_none());
        ids.remember(id, 17);
        assert_eq!(ids.get(id), Some(17));
        ids.remember(id, 18);
        assert_eq!(ids.get(id), Some(18));
        assert!(ids.get(NotificationId(2)).is_none());
    }
}
