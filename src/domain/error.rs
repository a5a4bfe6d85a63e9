//! Domain error types

use thiserror::Error;

use super::reminder::{MAX_DELAY_SECS, MIN_DELAY_SECS};

/// Error when a delay lies outside the slider range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Delay of {secs}s is out of range. Pick between {} and {} seconds",
    MIN_DELAY_SECS,
    MAX_DELAY_SECS
)]
pub struct InvalidDelay {
    pub secs: i64,
}

/// Error when parsing a delay string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DelayParseError {
    #[error("Invalid delay format: \"{input}\". Expected whole seconds, e.g. 5 or 5s")]
    Format { input: String },

    #[error(transparent)]
    OutOfRange(#[from] InvalidDelay),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
