//! Main app runner for one-shot mode

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::application::ports::{ConfigStore, NotificationService, PermissionService};
use crate::application::{
    FireOutcome, PermissionResultHandler, ReminderScreen, ScheduledReminder, SubmitOutcome,
};
use crate::domain::config::AppConfig;
use crate::domain::permission::{GrantState, PermissionMode};
use crate::domain::reminder::Draft;
use crate::infrastructure::{
    create_notification_service, ConsentPermission, ConsentPrompt, NoRuntimePermission,
    XdgConfigStore,
};

use super::args::ReminderOptions;
use super::consent::spawn_prompt_responder;
use super::input::spawn_stdin_lines;
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;
pub const EXIT_INTERRUPTED: u8 = 130;

/// Environment variable overriding the configured backend
pub const ENV_BACKEND: &str = "NUDGE_BACKEND";

pub type SharedNotifications = Arc<Box<dyn NotificationService>>;
pub type SharedPermissions = Arc<Box<dyn PermissionService>>;

/// Adapters for one run
pub struct Services {
    pub notifications: SharedNotifications,
    pub permissions: SharedPermissions,
    /// Present in consent mode; whoever owns the terminal answers these
    pub prompts: Option<mpsc::Receiver<ConsentPrompt>>,
}

impl Services {
    /// Wire up the adapters selected by `options`
    pub fn build(options: &ReminderOptions) -> Self {
        let notifications: SharedNotifications = Arc::new(create_notification_service(
            options.backend,
            &options.app_name,
        ));

        let (permissions, prompts) = match options.permission_mode {
            PermissionMode::None => (
                Box::new(NoRuntimePermission::new()) as Box<dyn PermissionService>,
                None,
            ),
            PermissionMode::Consent => {
                let store = Arc::new(XdgConfigStore::new());
                let (permission, prompts) = ConsentPermission::new(store);
                (
                    Box::new(permission) as Box<dyn PermissionService>,
                    Some(prompts),
                )
            }
        };

        Self {
            notifications,
            permissions: Arc::new(permissions),
            prompts,
        }
    }
}

/// Schedule one reminder and wait for it to fire
pub async fn run_oneshot(options: ReminderOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let shutdown = ShutdownSignal::new();
    shutdown.setup();

    let mut services = Services::build(&options);
    if let Some(prompts) = services.prompts.take() {
        spawn_prompt_responder(prompts, spawn_stdin_lines(), options.app_name.clone());
    }

    let (grant_tx, mut grant_rx) = mpsc::unbounded_channel();
    let on_permission_result: PermissionResultHandler = Arc::new(move |state| {
        let _ = grant_tx.send(state);
    });

    let mut draft = Draft::with_delay(options.delay);
    draft.set_message(options.message.clone());

    let mut screen = ReminderScreen::new(
        services.notifications,
        services.permissions,
        on_permission_result,
    )
    .with_draft(draft);
    screen.on_create().await;

    let reminder = match submit_with_permission(&mut screen, &mut grant_rx, &shutdown).await {
        Ok(reminder) => reminder,
        Err(Stop::Interrupted) => {
            screen.destroy();
            presenter.warn("Cancelled");
            return ExitCode::from(EXIT_INTERRUPTED);
        }
        Err(Stop::Failed(message)) => {
            screen.destroy();
            presenter.error(&message);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let total = reminder.delay().as_secs();
    let preview = presenter.preview(reminder.message()).replace('\n', " ");
    presenter.start_spinner(&format!(
        "{} {}",
        presenter.format_countdown(total, total),
        preview
    ));

    let mut ticker = interval_at(Instant::now() + Duration::from_secs(1), Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut remaining = total;

    let wait = reminder.wait();
    tokio::pin!(wait);

    let outcome = loop {
        tokio::select! {
            outcome = &mut wait => break outcome,
            _ = ticker.tick() => {
                remaining = remaining.saturating_sub(1);
                presenter.update_spinner(&format!(
                    "{} {}",
                    presenter.format_countdown(remaining, total),
                    preview
                ));
            }
            _ = shutdown.recv() => {
                screen.destroy();
                presenter.spinner_fail("Cancelled, reminder dropped");
                return ExitCode::from(EXIT_INTERRUPTED);
            }
        }
    };

    screen.destroy();

    match outcome {
        Some(FireOutcome::Posted) => {
            presenter.spinner_success("Reminder sent");
            ExitCode::from(EXIT_SUCCESS)
        }
        Some(FireOutcome::Dropped) => {
            presenter.spinner_fail("Notifications were turned off, reminder dropped");
            ExitCode::from(EXIT_ERROR)
        }
        Some(FireOutcome::Failed(e)) => {
            presenter.spinner_fail(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
        None => {
            presenter.spinner_fail("Reminder abandoned");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

enum Stop {
    Interrupted,
    Failed(String),
}

/// Submit the draft. If the first press only triggers the permission
/// prompt, wait for the answer and press once more.
async fn submit_with_permission<N, P>(
    screen: &mut ReminderScreen<N, P>,
    grants: &mut mpsc::UnboundedReceiver<GrantState>,
    shutdown: &ShutdownSignal,
) -> Result<ScheduledReminder, Stop>
where
    N: NotificationService + 'static,
    P: PermissionService + 'static,
{
    let mut asked = false;
    loop {
        // Answers to earlier prompts say nothing about this press
        while grants.try_recv().is_ok() {}

        match screen.submit().await {
            Ok(SubmitOutcome::Scheduled(reminder)) => return Ok(reminder),
            Ok(SubmitOutcome::PermissionRequired(_)) if !asked => {
                asked = true;
                let answer = tokio::select! {
                    answer = grants.recv() => answer,
                    _ = shutdown.recv() => return Err(Stop::Interrupted),
                };
                if !answer.is_some_and(|state| state.allows_posting()) {
                    return Err(Stop::Failed(not_allowed_message()));
                }
            }
            Ok(SubmitOutcome::PermissionRequired(_)) => {
                return Err(Stop::Failed(not_allowed_message()));
            }
            Err(e) => return Err(Stop::Failed(e.to_string())),
        }
    }
}

fn not_allowed_message() -> String {
    "Notifications are not allowed. Answer 'y' when asked, or run 'nudge config set permission granted'"
        .to_string()
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        backend: env::var(ENV_BACKEND).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
