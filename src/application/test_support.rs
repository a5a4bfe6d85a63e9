//! In-memory port implementations shared by the application tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;

use super::ports::{NotificationError, NotificationService, PermissionError, PermissionService};
use crate::domain::reminder::{NotificationChannel, NotificationId, ReminderNotification};

/// A post as the fake platform saw it
#[derive(Debug, Clone)]
pub struct Posted {
    pub id: NotificationId,
    pub notification: ReminderNotification,
    pub at: Instant,
}

/// Records every post and keeps a "tray" keyed by id, like a real
/// notification server would
#[derive(Default)]
pub struct RecordingNotifier {
    pub posts: Mutex<Vec<Posted>>,
    pub tray: Mutex<HashMap<NotificationId, ReminderNotification>>,
    pub channels: Mutex<Vec<NotificationChannel>>,
    pub fail_posts: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.fail_posts.store(true, Ordering::SeqCst);
        notifier
    }

    pub fn posts(&self) -> Vec<Posted> {
        self.posts.lock().unwrap().clone()
    }

    pub fn tray(&self) -> Vec<ReminderNotification> {
        self.tray.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl NotificationService for RecordingNotifier {
    async fn ensure_channel(
        &self,
        channel: &NotificationChannel,
    ) -> Result<(), NotificationError> {
        let mut channels = self.channels.lock().unwrap();
        if !channels.contains(channel) {
            channels.push(channel.clone());
        }
        Ok(())
    }

    async fn post(
        &self,
        id: NotificationId,
        notification: &ReminderNotification,
    ) -> Result<(), NotificationError> {
        if self.fail_posts.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("server gone".to_string()));
        }
        self.posts.lock().unwrap().push(Posted {
            id,
            notification: notification.clone(),
            at: Instant::now(),
        });
        self.tray.lock().unwrap().insert(id, notification.clone());
        Ok(())
    }
}

/// Permission service with a scripted answer
pub struct FakePermission {
    pub required: bool,
    pub granted: AtomicBool,
    pub answer: bool,
    pub requests: AtomicUsize,
}

impl FakePermission {
    pub fn not_required() -> Self {
        Self {
            required: false,
            granted: AtomicBool::new(false),
            answer: false,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn granted() -> Self {
        Self {
            required: true,
            granted: AtomicBool::new(true),
            answer: true,
            requests: AtomicUsize::new(0),
        }
    }

    /// Not granted yet; the prompt will be answered with `answer`
    pub fn ungranted(answer: bool) -> Self {
        Self {
            required: true,
            granted: AtomicBool::new(false),
            answer,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn revoke(&self) {
        self.granted.store(false, Ordering::SeqCst);
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionService for FakePermission {
    fn is_required(&self) -> bool {
        self.required
    }

    async fn is_granted(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    async fn request(&self) -> Result<bool, PermissionError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        // The answer arrives later, never inline with the check
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        self.granted.store(self.answer, Ordering::SeqCst);
        Ok(self.answer)
    }
}
