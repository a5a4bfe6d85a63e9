//! Notification permission grant states

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Whether reminders may currently be posted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrantState {
    /// The user has authorized notifications
    Granted,
    /// Not authorized (yet); nothing may be posted
    Denied,
    /// The platform has no runtime permission for notifications
    NotRequired,
}

impl GrantState {
    /// True when posting is allowed
    pub const fn allows_posting(&self) -> bool {
        matches!(self, Self::Granted | Self::NotRequired)
    }

    /// Map a yes/no answer from the platform prompt
    pub const fn from_answer(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::Denied
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::NotRequired => "not required",
        }
    }
}

impl fmt::Display for GrantState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the app obtains permission to post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionMode {
    /// Desktop behaviour: posting never needs a runtime grant
    #[default]
    None,
    /// Ask the user once and remember the answer
    Consent,
}

impl PermissionMode {
    pub const VALID: &'static [&'static str] = &["none", "consent"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Consent => "consent",
        }
    }
}

impl fmt::Display for PermissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for unrecognised permission settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value '{value}'. Valid options: {valid}")]
pub struct ParsePermissionError {
    pub value: String,
    pub valid: String,
}

impl FromStr for PermissionMode {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "consent" => Ok(Self::Consent),
            _ => Err(ParsePermissionError {
                value: s.to_string(),
                valid: Self::VALID.join(", "),
            }),
        }
    }
}

/// A remembered answer to the permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredGrant {
    Granted,
    Denied,
}

impl StoredGrant {
    pub const VALID: &'static [&'static str] = &["granted", "denied"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }

    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl From<bool> for StoredGrant {
    fn from(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::Denied
        }
    }
}

impl FromStr for StoredGrant {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "granted" => Ok(Self::Granted),
            "denied" => Ok(Self::Denied),
            _ => Err(ParsePermissionError {
                value: s.to_string(),
                valid: Self::VALID.join(", "),
            }),
        }
    }
}

impl fmt::Display for StoredGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
