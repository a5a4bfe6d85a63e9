//! Terminal side of the notification permission prompt

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::infrastructure::ConsentPrompt;

use super::presenter::Presenter;

/// Question shown for a permission prompt
pub fn consent_question(app_name: &str) -> String {
    format!("Allow {} to show notifications? [y/N]", app_name)
}

/// Anything but an explicit yes counts as a refusal
pub fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Answer prompts from stdin lines until either channel closes.
/// Prompts left when input runs out are dismissed.
pub fn spawn_prompt_responder(
    mut prompts: mpsc::Receiver<ConsentPrompt>,
    mut lines: mpsc::UnboundedReceiver<String>,
    app_name: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let presenter = Presenter::new();
        while let Some(prompt) = prompts.recv().await {
            presenter.question(&consent_question(&app_name));
            match lines.recv().await {
                Some(line) => prompt.answer(parse_answer(&line)),
                None => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers() {
        assert!(parse_answer("y"));
        assert!(parse_answer("Yes"));
        assert!(parse_answer("  YES \n"));
    }

    #[test]
    fn everything_else_is_no() {
        assert!(!parse_answer(""));
        assert!(!parse_answer("n"));
        assert!(!parse_answer("sure"));
    }

    #[test]
    fn question_names_the_app() {
        assert_eq!(
            consent_question("Nudge"),
            "Allow Nudge to show notifications? [y/N]"
        );
    }
}
