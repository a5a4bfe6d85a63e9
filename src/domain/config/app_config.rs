//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::permission::{PermissionMode, StoredGrant};
use crate::domain::reminder::Delay;

/// Default application name shown by the notification server
pub const DEFAULT_APP_NAME: &str = "Nudge";

/// Default notification backend
pub const DEFAULT_BACKEND: &str = "notify-rust";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub delay: Option<u8>,
    pub backend: Option<String>,
    pub app_name: Option<String>,
    pub permission_mode: Option<String>,
    pub permission: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            delay: Some(Delay::default().as_secs() as u8),
            backend: Some(DEFAULT_BACKEND.to_string()),
            app_name: Some(DEFAULT_APP_NAME.to_string()),
            permission_mode: Some(PermissionMode::default().to_string()),
            permission: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            delay: other.delay.or(self.delay),
            backend: other.backend.or(self.backend),
            app_name: other.app_name.or(self.app_name),
            permission_mode: other.permission_mode.or(self.permission_mode),
            permission: other.permission.or(self.permission),
        }
    }

    /// Get delay, or the slider minimum if not set/out of range
    pub fn delay_or_default(&self) -> Delay {
        self.delay
            .and_then(|secs| Delay::new(i64::from(secs)).ok())
            .unwrap_or_default()
    }

    /// Get backend name, or "notify-rust" if not set
    pub fn backend_or_default(&self) -> &str {
        self.backend.as_deref().unwrap_or(DEFAULT_BACKEND)
    }

    /// Get app name, or "Nudge" if not set
    pub fn app_name_or_default(&self) -> &str {
        self.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME)
    }

    /// Get permission mode, or `none` if not set/invalid
    pub fn permission_mode_or_default(&self) -> PermissionMode {
        self.permission_mode
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Remembered prompt answer, if any
    pub fn stored_grant(&self) -> Option<StoredGrant> {
        self.permission.as_ref().and_then(|s| s.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.delay, Some(1));
        assert_eq!(config.backend, Some("notify-rust".to_string()));
        assert_eq!(config.app_name, Some("Nudge".to_string()));
        assert_eq!(config.permission_mode, Some("none".to_string()));
        assert!(config.permission.is_none());
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.delay.is_none());
        assert!(config.backend.is_none());
        assert!(config.app_name.is_none());
        assert!(config.permission_mode.is_none());
        assert!(config.permission.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            delay: Some(10),
            backend: Some("notify-rust".to_string()),
            app_name: Some("Base".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            delay: None, // Should not override
            backend: Some("terminal".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.delay, Some(10));
        assert_eq!(merged.backend, Some("terminal".to_string()));
        assert_eq!(merged.app_name, Some("Base".to_string()));
    }

    #[test]
    fn delay_or_default_uses_configured() {
        let config = AppConfig {
            delay: Some(45),
            ..Default::default()
        };
        assert_eq!(config.delay_or_default().as_secs(), 45);
    }

    #[test]
    fn delay_or_default_ignores_out_of_range() {
        let config = AppConfig {
            delay: Some(0),
            ..Default::default()
        };
        assert_eq!(config.delay_or_default().as_secs(), 1);

        let config = AppConfig {
            delay: Some(200),
            ..Default::default()
        };
        assert_eq!(config.delay_or_default().as_secs(), 1);
    }

    #[test]
    fn string_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.backend_or_default(), "notify-rust");
        assert_eq!(config.app_name_or_default(), "Nudge");
        assert_eq!(config.permission_mode_or_default(), PermissionMode::None);
        assert!(config.stored_grant().is_none());
    }

    #[test]
    fn permission_fields_parse() {
        let config = AppConfig {
            permission_mode: Some("consent".to_string()),
            permission: Some("granted".to_string()),
            ..Default::default()
        };
        assert_eq!(config.permission_mode_or_default(), PermissionMode::Consent);
        assert_eq!(config.stored_grant(), Some(StoredGrant::Granted));
    }

    #[test]
    fn invalid_permission_mode_falls_back() {
        let config = AppConfig {
            permission_mode: Some("bogus".to_string()),
            permission: Some("bogus".to_string()),
            ..Default::default()
        };
        assert_eq!(config.permission_mode_or_default(), PermissionMode::None);
        assert!(config.stored_grant().is_none());
    }
}
