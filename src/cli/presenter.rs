//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::reminder::Draft;

/// Lines of the message shown in previews
pub const PREVIEW_MAX_LINES: usize = 2;

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Ask a yes/no question on stderr, leaving the cursor on the same line
    pub fn question(&self, text: &str) {
        eprint!("{} {} ", "?".yellow(), text);
        let _ = io::stderr().flush();
    }

    /// Input prompt for the interactive screen
    pub fn prompt(&self) {
        eprint!("{} ", "›".cyan());
        let _ = io::stderr().flush();
    }

    /// Message preview, cut to `PREVIEW_MAX_LINES` lines
    pub fn preview(&self, message: &str) -> String {
        if message.is_empty() {
            return "(empty)".dimmed().to_string();
        }

        let mut lines = message.lines();
        let shown: Vec<&str> = lines.by_ref().take(PREVIEW_MAX_LINES).collect();
        let mut preview = shown.join("\n");
        if lines.next().is_some() {
            preview.push('…');
        }
        preview
    }

    /// Countdown bar for a waiting reminder
    pub fn format_countdown(&self, remaining_secs: u64, total_secs: u64) -> String {
        let elapsed = total_secs.saturating_sub(remaining_secs);
        let percent = if total_secs > 0 {
            (elapsed as f64 / total_secs as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        let bar_width = 20;
        let filled = ((percent / 100.0) * bar_width as f64) as usize;
        let empty = bar_width - filled;

        format!(
            "[{}{}] {:>2}s left of {}s",
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            remaining_secs,
            total_secs
        )
    }

    /// Print the draft the screen is editing
    pub fn draft(&self, draft: &Draft) {
        self.key_value("message", &self.preview(draft.message()));
        self.key_value("delay", &draft.delay().to_string());
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
