//! Notification scheduler: wait, then post one reminder

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::domain::reminder::{
    Delay, NotificationChannel, ReminderNotification, REMINDER_NOTIFICATION_ID,
};
use crate::domain::submission::{Submission, SubmissionState};

use super::ports::{NotificationError, NotificationService, PermissionService};
use super::scope::{LifecycleScope, ScopeClosed};

/// How a scheduled reminder ended
#[derive(Debug, Clone)]
pub enum FireOutcome {
    /// The notification reached the platform service
    Posted,
    /// Permission was gone by fire time; nothing was posted
    Dropped,
    /// The platform service refused the notification
    Failed(NotificationError),
}

impl FireOutcome {
    pub fn is_posted(&self) -> bool {
        matches!(self, Self::Posted)
    }
}

/// A reminder waiting to fire.
///
/// Only reports the result; it cannot cancel the wait.
#[derive(Debug)]
pub struct ScheduledReminder {
    message: String,
    delay: Delay,
    submission: Arc<Mutex<Submission>>,
    outcome: oneshot::Receiver<FireOutcome>,
}

impl ScheduledReminder {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn delay(&self) -> Delay {
        self.delay
    }

    /// Where this submission currently stands
    pub fn state(&self) -> SubmissionState {
        self.submission
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .state()
    }

    /// Wait for the reminder to finish.
    ///
    /// # Returns
    /// `None` if the owning scope was torn down before it fired
    pub async fn wait(self) -> Option<FireOutcome> {
        self.outcome.await.ok()
    }
}

/// Runs one-shot delayed notifications on a lifecycle scope
pub struct NotificationScheduler<N, P>
where
    N: NotificationService,
    P: PermissionService,
{
    notifications: Arc<N>,
    permissions: Arc<P>,
    scope: Arc<LifecycleScope>,
}

impl<N, P> NotificationScheduler<N, P>
where
    N: NotificationService + 'static,
    P: PermissionService + 'static,
{
    /// Create a new scheduler instance
    pub fn new(notifications: Arc<N>, permissions: Arc<P>, scope: Arc<LifecycleScope>) -> Self {
        Self {
            notifications,
            permissions,
            scope,
        }
    }

    /// Post `message` once `delay` has passed.
    ///
    /// The caller is expected to have confirmed permission already.
    pub fn schedule(&self, message: &str, delay: Delay) -> Result<ScheduledReminder, ScopeClosed> {
        let submission = Arc::new(Mutex::new(Submission::waiting()));
        self.schedule_submission(submission, message, delay)
    }

    /// Like [`schedule`](Self::schedule), for a submission already tracked
    /// by the caller. The submission must be waiting.
    pub fn schedule_submission(
        &self,
        submission: Arc<Mutex<Submission>>,
        message: &str,
        delay: Delay,
    ) -> Result<ScheduledReminder, ScopeClosed> {
        let (tx, rx) = oneshot::channel();

        let notifications = Arc::clone(&self.notifications);
        let permissions = Arc::clone(&self.permissions);
        let task_submission = Arc::clone(&submission);
        let body = message.to_owned();

        self.scope.launch(async move {
            tokio::time::sleep(delay.as_std()).await;

            if let Err(e) = task_submission
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .fire()
            {
                debug!("{}", e);
            }

            let outcome = Self::fire(notifications.as_ref(), permissions.as_ref(), &body).await;
            let _ = tx.send(outcome);
        })?;

        debug!(%delay, "reminder scheduled");

        Ok(ScheduledReminder {
            message: message.to_owned(),
            delay,
            submission,
            outcome: rx,
        })
    }

    /// Build and post the reminder, unless permission went away meanwhile
    async fn fire(notifications: &N, permissions: &P, message: &str) -> FireOutcome {
        if permissions.is_required() && !permissions.is_granted().await {
            debug!("notification permission revoked before fire time; dropping reminder");
            return FireOutcome::Dropped;
        }

        if let Err(e) = notifications
            .ensure_channel(&NotificationChannel::reminders())
            .await
        {
            warn!("failed to register reminder channel: {}", e);
            return FireOutcome::Failed(e);
        }

        let notification = ReminderNotification::new(message);
        match notifications
            .post(REMINDER_NOTIFICATION_ID, &notification)
            .await
        {
            Ok(()) => {
                debug!(id = %REMINDER_NOTIFICATION_ID, "reminder posted");
                FireOutcome::Posted
            }
            Err(e) => {
                warn!("failed to post reminder: {}", e);
                FireOutcome::Failed(e)
            }
        }
    }
}
