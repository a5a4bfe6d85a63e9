//! Delay value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::{DelayParseError, InvalidDelay};

/// Shortest delay the slider allows
pub const MIN_DELAY_SECS: u8 = 1;

/// Longest delay the slider allows
pub const MAX_DELAY_SECS: u8 = 60;

/// Whole-second wait between submission and delivery.
/// Always within `MIN_DELAY_SECS..=MAX_DELAY_SECS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Delay {
    seconds: u8,
}

impl Delay {
    /// Create a delay, rejecting values outside the slider range
    pub fn new(secs: i64) -> Result<Self, InvalidDelay> {
        if secs < i64::from(MIN_DELAY_SECS) || secs > i64::from(MAX_DELAY_SECS) {
            return Err(InvalidDelay { secs });
        }
        Ok(Self {
            seconds: secs as u8,
        })
    }

    /// Snap any value onto the slider range
    pub fn clamped(secs: i64) -> Self {
        let secs = secs.clamp(i64::from(MIN_DELAY_SECS), i64::from(MAX_DELAY_SECS));
        Self {
            seconds: secs as u8,
        }
    }

    pub const fn min() -> Self {
        Self {
            seconds: MIN_DELAY_SECS,
        }
    }

    pub const fn max() -> Self {
        Self {
            seconds: MAX_DELAY_SECS,
        }
    }

    /// Get the delay in seconds
    pub const fn as_secs(&self) -> u64 {
        self.seconds as u64
    }

    /// Get the delay in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.seconds as u64 * 1000
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.as_millis())
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::min()
    }
}

impl FromStr for Delay {
    type Err = DelayParseError;

    /// Accepts "5" or "5s"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let digits = input.strip_suffix('s').unwrap_or(&input);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DelayParseError::Format {
                input: s.to_string(),
            });
        }

        // Anything too long for i64 is out of range anyway
        let secs: i64 = digits.parse().unwrap_or(i64::MAX);
        Ok(Self::new(secs)?)
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.seconds)
    }
}
