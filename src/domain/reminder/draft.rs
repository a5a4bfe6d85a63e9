//! Draft entity: what the user is currently composing

use super::delay::Delay;

/// The message and delay currently on screen.
///
/// Lives only as long as the screen that owns it. The message is free text
/// and may be empty; the delay always sits inside the slider range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    message: String,
    delay: Delay,
}

impl Draft {
    /// Empty message, one second delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a configured delay instead of the minimum
    pub fn with_delay(delay: Delay) -> Self {
        Self {
            message: String::new(),
            delay,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn delay(&self) -> Delay {
        self.delay
    }

    /// Replace the message with whatever the user typed
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn set_delay(&mut self, delay: Delay) {
        self.delay = delay;
    }

    /// Move the slider; values past either end stick to that end
    pub fn slide_to(&mut self, secs: i64) {
        self.delay = Delay::clamped(secs);
    }
}
