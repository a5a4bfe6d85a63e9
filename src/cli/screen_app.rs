//! Interactive reminder screen runner

use std::process::ExitCode;
use std::sync::Arc;

use colored::Colorize;
use tokio::sync::mpsc;
use tracing::debug;

use crate::application::ports::{NotificationService, PermissionService};
use crate::application::{FireOutcome, PermissionResultHandler, ReminderScreen, SubmitOutcome};
use crate::domain::permission::GrantState;
use crate::domain::reminder::Draft;
use crate::infrastructure::ConsentPrompt;

use super::app::{Services, EXIT_SUCCESS};
use super::args::ReminderOptions;
use super::consent::{consent_question, parse_answer};
use super::input::spawn_stdin_lines;
use super::presenter::Presenter;
use super::screen_cmd::{parse_command, ScreenCommand, SCREEN_HELP};
use super::signals::ShutdownSignal;

/// Things that happen on the screen without the user typing
#[derive(Debug)]
enum ScreenEvent {
    Permission(GrantState),
    Finished {
        message: String,
        outcome: Option<FireOutcome>,
    },
}

/// Run the interactive screen until `quit`, Ctrl+C, or end of input.
///
/// At end of input the screen stays open until every scheduled reminder
/// has fired, so piped scripts still get their notifications.
pub async fn run_screen(options: ReminderOptions) -> ExitCode {
    let presenter = Presenter::new();

    let shutdown = ShutdownSignal::new();
    shutdown.setup();

    let mut services = Services::build(&options);
    let mut prompts = services.prompts.take();

    let (events_tx, mut events) = mpsc::unbounded_channel();
    let permission_events = events_tx.clone();
    let on_permission_result: PermissionResultHandler = Arc::new(move |state| {
        let _ = permission_events.send(ScreenEvent::Permission(state));
    });

    let mut screen = ReminderScreen::new(
        services.notifications,
        services.permissions,
        on_permission_result,
    )
    .with_draft(Draft::with_delay(options.delay));

    presenter.info("Reminder screen. Type 'help' for commands.");
    screen.on_create().await;

    let mut lines = spawn_stdin_lines();
    let mut input_open = true;
    let mut pending_prompt: Option<ConsentPrompt> = None;
    let mut waiting = 0usize;

    presenter.prompt();

    loop {
        if !input_open && waiting == 0 {
            break;
        }

        // A prompt in flight is modal: hold input until it shows up, and
        // after answering until its result is reported
        let read_input = input_open && (pending_prompt.is_some() || !screen.is_prompting());

        tokio::select! {
            _ = shutdown.recv() => {
                eprintln!();
                break;
            }
            Some(prompt) = next_prompt(&mut prompts) => {
                presenter.question(&consent_question(&options.app_name));
                pending_prompt = Some(prompt);
            }
            Some(event) = events.recv() => {
                if let ScreenEvent::Finished { .. } = event {
                    waiting = waiting.saturating_sub(1);
                }
                show_event(&presenter, event);
                if input_open && pending_prompt.is_none() {
                    presenter.prompt();
                }
            }
            line = lines.recv(), if read_input => {
                let Some(line) = line else {
                    debug!(waiting, "input closed");
                    input_open = false;
                    // Dismiss: nobody is left to answer
                    pending_prompt = None;
                    continue;
                };

                if let Some(prompt) = pending_prompt.take() {
                    prompt.answer(parse_answer(&line));
                    continue;
                }

                match handle_line(&mut screen, &presenter, &line, &events_tx).await {
                    LineResult::Continue => {}
                    LineResult::Scheduled => waiting += 1,
                    LineResult::Quit => break,
                }
                presenter.prompt();
            }
        }
    }

    let abandoned = screen.pending();
    screen.destroy();
    if abandoned > 0 {
        presenter.warn(&format!("Screen closed, {} pending task(s) dropped", abandoned));
    }

    ExitCode::from(EXIT_SUCCESS)
}

enum LineResult {
    Continue,
    Scheduled,
    Quit,
}

async fn handle_line<N, P>(
    screen: &mut ReminderScreen<N, P>,
    presenter: &Presenter,
    line: &str,
    events: &mpsc::UnboundedSender<ScreenEvent>,
) -> LineResult
where
    N: NotificationService + 'static,
    P: PermissionService + 'static,
{
    let command = match parse_command(line) {
        Ok(Some(command)) => command,
        Ok(None) => return LineResult::Continue,
        Err(e) => {
            presenter.error(&e.to_string());
            return LineResult::Continue;
        }
    };

    match command {
        ScreenCommand::Message(text) => {
            screen.set_message(text);
            presenter.key_value("message", &presenter.preview(screen.draft().message()));
        }
        ScreenCommand::Delay(delay) => {
            screen.set_delay(delay);
            presenter.key_value("delay", &screen.draft().delay().to_string());
        }
        ScreenCommand::Slide(secs) => {
            screen.slide_to(secs);
            presenter.key_value("delay", &screen.draft().delay().to_string());
        }
        ScreenCommand::Show => presenter.draft(screen.draft()),
        ScreenCommand::Help => {
            for (usage, description) in SCREEN_HELP {
                eprintln!("  {} {}", format!("{:<16}", usage).cyan(), description);
            }
        }
        ScreenCommand::Quit => return LineResult::Quit,
        ScreenCommand::Submit => match screen.submit().await {
            Ok(SubmitOutcome::Scheduled(reminder)) => {
                presenter.success(&format!("Reminder in {}", reminder.delay()));
                let message = reminder.message().to_string();
                let events = events.clone();
                tokio::spawn(async move {
                    let outcome = reminder.wait().await;
                    let _ = events.send(ScreenEvent::Finished { message, outcome });
                });
                return LineResult::Scheduled;
            }
            Ok(SubmitOutcome::PermissionRequired(state)) => {
                presenter.warn(&format!(
                    "Notifications are not allowed yet ({}). Submit again once you allow them",
                    state
                ));
            }
            Err(e) => presenter.error(&e.to_string()),
        },
    }

    LineResult::Continue
}

fn show_event(presenter: &Presenter, event: ScreenEvent) {
    match event {
        ScreenEvent::Permission(state) if state.allows_posting() => {
            presenter.success("Notifications allowed");
        }
        ScreenEvent::Permission(_) => presenter.warn("Notifications not allowed"),
        ScreenEvent::Finished { message, outcome } => {
            let preview = presenter.preview(&message).replace('\n', " ");
            match outcome {
                Some(FireOutcome::Posted) => presenter.success(&format!("Sent: {}", preview)),
                Some(FireOutcome::Dropped) => {
                    presenter.warn(&format!("Dropped, notifications turned off: {}", preview))
                }
                Some(FireOutcome::Failed(e)) => presenter.error(&format!("{}: {}", preview, e)),
                None => debug!("reminder abandoned"),
            }
        }
    }
}

async fn next_prompt(prompts: &mut Option<mpsc::Receiver<ConsentPrompt>>) -> Option<ConsentPrompt> {
    match prompts {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
