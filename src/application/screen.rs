//! Reminder screen controller

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::debug;

use crate::domain::permission::GrantState;
use crate::domain::reminder::{Delay, Draft};
use crate::domain::submission::{InvalidStateTransition, Submission, SubmissionState};

use super::permission_gate::{PermissionGate, PermissionResultHandler};
use super::ports::{NotificationService, PermissionService};
use super::scheduler::{NotificationScheduler, ScheduledReminder};
use super::scope::{LifecycleScope, ScopeClosed};

/// Errors from the screen
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Closed(#[from] ScopeClosed),

    #[error(transparent)]
    InvalidState(#[from] InvalidStateTransition),
}

/// What a submit press led to
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The reminder is waiting to fire
    Scheduled(ScheduledReminder),
    /// Nothing was scheduled; a permission prompt may now be showing
    PermissionRequired(GrantState),
}

/// The single reminder screen.
///
/// Holds the draft the user is editing and owns the scope every reminder
/// and permission prompt runs on. Destroying the screen abandons whatever
/// is still waiting.
pub struct ReminderScreen<N, P>
where
    N: NotificationService,
    P: PermissionService,
{
    draft: Draft,
    gate: PermissionGate<P>,
    scheduler: NotificationScheduler<N, P>,
    scope: Arc<LifecycleScope>,
    last: Arc<Mutex<Submission>>,
}

impl<N, P> ReminderScreen<N, P>
where
    N: NotificationService + 'static,
    P: PermissionService + 'static,
{
    /// Create a screen with an empty draft
    pub fn new(
        notifications: Arc<N>,
        permissions: Arc<P>,
        on_permission_result: PermissionResultHandler,
    ) -> Self {
        let scope = Arc::new(LifecycleScope::new());
        let gate = PermissionGate::new(
            Arc::clone(&permissions),
            Arc::clone(&scope),
            on_permission_result,
        );
        let scheduler = NotificationScheduler::new(notifications, permissions, Arc::clone(&scope));

        Self {
            draft: Draft::new(),
            gate,
            scheduler,
            scope,
            last: Arc::new(Mutex::new(Submission::new())),
        }
    }

    /// Start from a prepared draft
    pub fn with_draft(mut self, draft: Draft) -> Self {
        self.draft = draft;
        self
    }

    /// Called once when the screen is shown; asks for permission up front
    pub async fn on_create(&self) {
        self.gate.prompt_on_launch().await;
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.draft.set_message(message);
    }

    pub fn set_delay(&mut self, delay: Delay) {
        self.draft.set_delay(delay);
    }

    pub fn slide_to(&mut self, secs: i64) {
        self.draft.slide_to(secs);
    }

    /// Submit the current draft.
    ///
    /// Permission is checked first. Without it nothing is scheduled and the
    /// user has to submit again once the prompt has been answered.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, ScreenError> {
        let submission = Arc::new(Mutex::new(Submission::new()));
        self.last = Arc::clone(&submission);

        lock(&submission).begin_check()?;
        let grant = self.gate.check_and_request().await;

        if !grant.allows_posting() {
            lock(&submission).deny()?;
            debug!(%grant, "submission stopped at permission check");
            return Ok(SubmitOutcome::PermissionRequired(grant));
        }

        lock(&submission).grant()?;
        let reminder = self.scheduler.schedule_submission(
            submission,
            self.draft.message(),
            self.draft.delay(),
        )?;

        Ok(SubmitOutcome::Scheduled(reminder))
    }

    /// State of the most recent submission
    pub fn last_submission_state(&self) -> SubmissionState {
        lock(&self.last).state()
    }

    /// Reminders and prompts still running on this screen
    pub fn pending(&self) -> usize {
        self.scope.pending()
    }

    pub fn is_prompting(&self) -> bool {
        self.gate.is_prompting()
    }

    /// Close the screen, abandoning anything still waiting
    pub fn destroy(self) {
        self.scope.teardown();
    }
}

impl<N, P> Drop for ReminderScreen<N, P>
where
    N: NotificationService,
    P: PermissionService,
{
    fn drop(&mut self) {
        self.scope.teardown();
    }
}

fn lock(submission: &Mutex<Submission>) -> std::sync::MutexGuard<'_, Submission> {
    submission.lock().unwrap_or_else(|e| e.into_inner())
}
