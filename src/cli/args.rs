//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

use crate::domain::permission::PermissionMode;
use crate::domain::reminder::Delay;
use crate::infrastructure::NotificationBackend;

/// Nudge - delayed desktop reminders
#[derive(Parser, Debug)]
#[command(name = "nudge")]
#[command(version)]
#[command(about = "Show yourself a reminder notification after a short delay")]
#[command(long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Reminder text (may be empty)
    #[arg(value_name = "MESSAGE", conflicts_with = "screen")]
    pub message: Option<String>,

    /// Seconds to wait before the reminder fires (1-60, e.g. 5 or 5s)
    #[arg(short = 'd', long, value_name = "SECS", allow_hyphen_values = true)]
    pub delay: Option<String>,

    /// Notification backend (notify-rust, notify-send, terminal)
    #[arg(short = 'b', long, value_name = "BACKEND")]
    pub backend: Option<String>,

    /// Open the interactive reminder screen
    #[arg(short = 's', long)]
    pub screen: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Resolved options for one run, after config merging
#[derive(Debug, Clone)]
pub struct ReminderOptions {
    pub message: String,
    pub delay: Delay,
    pub backend: NotificationBackend,
    pub app_name: String,
    pub permission_mode: PermissionMode,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "delay",
    "backend",
    "app_name",
    "permission_mode",
    "permission",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["nudge"]);
        assert!(cli.message.is_none());
        assert!(cli.delay.is_none());
        assert!(cli.backend.is_none());
        assert!(!cli.screen);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_message_and_delay() {
        let cli = Cli::parse_from(["nudge", "-d", "5", "Выпить воды"]);
        assert_eq!(cli.message, Some("Выпить воды".to_string()));
        assert_eq!(cli.delay, Some("5".to_string()));
    }

    #[test]
    fn cli_keeps_negative_delay_for_validation() {
        let cli = Cli::parse_from(["nudge", "--delay", "-3", "hi"]);
        assert_eq!(cli.delay, Some("-3".to_string()));
    }

    #[test]
    fn cli_parses_backend() {
        let cli = Cli::parse_from(["nudge", "-b", "terminal", "hi"]);
        assert_eq!(cli.backend, Some("terminal".to_string()));
    }

    #[test]
    fn cli_parses_screen_with_delay() {
        let cli = Cli::parse_from(["nudge", "--screen", "-d", "10"]);
        assert!(cli.screen);
        assert_eq!(cli.delay, Some("10".to_string()));
    }

    #[test]
    fn screen_conflicts_with_message() {
        let result = Cli::try_parse_from(["nudge", "--screen", "hi"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["nudge", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["nudge", "config", "set", "delay", "30"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "delay");
            assert_eq!(value, "30");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("delay"));
        assert!(is_valid_config_key("backend"));
        assert!(is_valid_config_key("permission"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
