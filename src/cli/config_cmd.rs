//! Config command handler

use crate::application::ports::{ConfigEdit, ConfigStore};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::permission::{PermissionMode, StoredGrant};
use crate::domain::reminder::Delay;
use crate::infrastructure::NotificationBackend;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let normalized = validate_config_value(key, value)?;

    let edit: ConfigEdit = match key {
        "delay" => {
            let delay: Delay = normalized.parse().map_err(|e| validation(key, e))?;
            let secs = delay.as_secs() as u8;
            Box::new(move |config: &mut AppConfig| config.delay = Some(secs))
        }
        "backend" => {
            let value = normalized.clone();
            Box::new(move |config: &mut AppConfig| config.backend = Some(value))
        }
        "app_name" => {
            let value = normalized.clone();
            Box::new(move |config: &mut AppConfig| config.app_name = Some(value))
        }
        "permission_mode" => {
            let value = normalized.clone();
            Box::new(move |config: &mut AppConfig| config.permission_mode = Some(value))
        }
        "permission" => {
            let value = normalized.clone();
            Box::new(move |config: &mut AppConfig| config.permission = Some(value))
        }
        _ => unreachable!(), // Already validated
    };

    store.update(edit).await?;
    presenter.success(&format!("{} = {}", key, normalized));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;

    let value = match key {
        "delay" => config.delay.map(|d| d.to_string()),
        "backend" => config.backend,
        "app_name" => config.app_name,
        "permission_mode" => config.permission_mode,
        "permission" => config.permission,
        _ => unreachable!(),
    };

    presenter.output(value.as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    presenter.key_value(
        "delay",
        &config
            .delay
            .map(|d| d.to_string())
            .unwrap_or_else(|| NOT_SET.to_string()),
    );
    presenter.key_value("backend", config.backend.as_deref().unwrap_or(NOT_SET));
    presenter.key_value("app_name", config.app_name.as_deref().unwrap_or(NOT_SET));
    presenter.key_value(
        "permission_mode",
        config.permission_mode.as_deref().unwrap_or(NOT_SET),
    );
    presenter.key_value("permission", config.permission.as_deref().unwrap_or(NOT_SET));

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn validation(key: &str, e: impl ToString) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: e.to_string(),
    }
}

/// Validate a config value and return it in the form it is stored
fn validate_config_value(key: &str, value: &str) -> Result<String, ConfigError> {
    match key {
        "delay" => {
            let delay: Delay = value.parse().map_err(|e| validation(key, e))?;
            Ok(delay.as_secs().to_string())
        }
        "backend" => {
            let backend: NotificationBackend = value.parse().map_err(|e| validation(key, e))?;
            Ok(backend.to_string())
        }
        "permission_mode" => {
            let mode: PermissionMode = value.parse().map_err(|e| validation(key, e))?;
            Ok(mode.to_string())
        }
        "permission" => {
            let grant: StoredGrant = value.parse().map_err(|e| validation(key, e))?;
            Ok(grant.to_string())
        }
        "app_name" => {
            if value.trim().is_empty() {
                return Err(validation(key, "Value must not be empty"));
            }
            Ok(value.to_string())
        }
        _ => Ok(value.to_string()),
    }
}
