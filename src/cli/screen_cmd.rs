//! Commands understood by the interactive reminder screen

use thiserror::Error;

use crate::domain::error::DelayParseError;
use crate::domain::reminder::Delay;

/// One line of screen input, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Replace the message. `\n` in the text starts a new line and `\\`
    /// stands for one backslash.
    Message(String),
    /// Set the delay exactly; out-of-range values are rejected
    Delay(Delay),
    /// Move the slider; out-of-range values snap to the nearest end
    Slide(i64),
    Show,
    Submit,
    Help,
    Quit,
}

/// Errors from parsing a screen command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for the list")]
    Unknown(String),

    #[error("'{0}' needs a value")]
    MissingValue(&'static str),

    #[error("Slider position must be a whole number, got '{0}'")]
    InvalidPosition(String),

    #[error(transparent)]
    InvalidDelay(#[from] DelayParseError),
}

/// Help text for the screen
pub const SCREEN_HELP: &[(&str, &str)] = &[
    ("message <text>", "set the reminder text (\\n for a new line, \\\\ for a backslash)"),
    ("delay <secs>", "set the delay, 1-60 seconds"),
    ("slide <secs>", "move the delay slider, snapping to 1-60"),
    ("show", "show the current draft"),
    ("submit", "schedule the reminder"),
    ("help", "show this help"),
    ("quit", "close the screen, dropping pending reminders"),
];

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ScreenCommand>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let trimmed = line.trim_start();
    let (word, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    let command = match word.to_lowercase().as_str() {
        "message" | "m" => ScreenCommand::Message(unescape(rest)),
        "delay" | "d" => {
            let value = required(rest, "delay")?;
            ScreenCommand::Delay(value.parse()?)
        }
        "slide" => {
            let value = required(rest, "slide")?;
            let secs = value
                .parse::<i64>()
                .map_err(|_| CommandError::InvalidPosition(value.to_string()))?;
            ScreenCommand::Slide(secs)
        }
        "show" | "s" => ScreenCommand::Show,
        "submit" | "send" => ScreenCommand::Submit,
        "help" | "?" => ScreenCommand::Help,
        "quit" | "exit" | "q" => ScreenCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

/// Expand `\n` and `\\`. Any other backslash is kept as typed.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn required<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, CommandError> {
    let value = rest.trim();
    if value.is_empty() {
        return Err(CommandError::MissingValue(command));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_command("").unwrap(), None);
        assert_eq!(parse_command("   \r\n").unwrap(), None);
    }

    #[test]
    fn message_keeps_text_verbatim() {
        assert_eq!(
            parse_command("message Выпить воды").unwrap(),
            Some(ScreenCommand::Message("Выпить воды".to_string()))
        );
        assert_eq!(
            parse_command("message   two  spaces ").unwrap(),
            Some(ScreenCommand::Message("  two  spaces ".to_string()))
        );
    }

    #[test]
    fn message_without_text_clears() {
        assert_eq!(
            parse_command("message").unwrap(),
            Some(ScreenCommand::Message(String::new()))
        );
    }

    #[test]
    fn message_expands_newlines() {
        assert_eq!(
            parse_command("m first\\nsecond").unwrap(),
            Some(ScreenCommand::Message("first\nsecond".to_string()))
        );
    }

    #[test]
    fn message_escaped_backslash_stays_literal() {
        assert_eq!(
            parse_command("m C:\\\\notes").unwrap(),
            Some(ScreenCommand::Message("C:\\notes".to_string()))
        );
        assert_eq!(
            parse_command("m a\\tb\\").unwrap(),
            Some(ScreenCommand::Message("a\\tb\\".to_string()))
        );
    }

    #[test]
    fn wide_whitespace_after_command_word() {
        assert_eq!(
            parse_command("message\u{a0}Выпить воды").unwrap(),
            Some(ScreenCommand::Message("Выпить воды".to_string()))
        );
        assert_eq!(
            parse_command("m\u{3000}hi").unwrap(),
            Some(ScreenCommand::Message("hi".to_string()))
        );
        assert_eq!(
            parse_command("delay\u{3000}7").unwrap(),
            Some(ScreenCommand::Delay(Delay::new(7).unwrap()))
        );
    }

    #[test]
    fn delay_is_validated() {
        assert_eq!(
            parse_command("delay 5").unwrap(),
            Some(ScreenCommand::Delay(Delay::new(5).unwrap()))
        );
        assert!(matches!(
            parse_command("delay 61"),
            Err(CommandError::InvalidDelay(DelayParseError::OutOfRange(_)))
        ));
        assert!(matches!(
            parse_command("delay"),
            Err(CommandError::MissingValue("delay"))
        ));
    }

    #[test]
    fn slide_accepts_any_integer() {
        assert_eq!(
            parse_command("slide 500").unwrap(),
            Some(ScreenCommand::Slide(500))
        );
        assert_eq!(
            parse_command("slide -4").unwrap(),
            Some(ScreenCommand::Slide(-4))
        );
        assert!(matches!(
            parse_command("slide far"),
            Err(CommandError::InvalidPosition(_))
        ));
    }

    #[test]
    fn simple_commands_and_aliases() {
        assert_eq!(parse_command("SHOW").unwrap(), Some(ScreenCommand::Show));
        assert_eq!(parse_command("submit").unwrap(), Some(ScreenCommand::Submit));
        assert_eq!(parse_command("?").unwrap(), Some(ScreenCommand::Help));
        assert_eq!(parse_command("exit").unwrap(), Some(ScreenCommand::Quit));
    }

    #[test]
    fn unknown_command_is_reported() {
        let err = parse_command("launch").unwrap_err();
        assert!(err.to_string().contains("launch"));
    }
}
