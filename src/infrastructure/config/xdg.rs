//! Config file under the XDG config directory
//!
//! The file is rewritten by both `nudge config set` and consent answers, so
//! every write replaces it whole through a sibling temp file and edits made
//! through one store never interleave.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::ports::{ConfigEdit, ConfigStore};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const APP_DIR: &str = "nudge";
const FILE_NAME: &str = "config.toml";

/// `$XDG_CONFIG_HOME/nudge/config.toml`
pub struct XdgConfigStore {
    path: PathBuf,
    writes: Mutex<()>,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from(".config"));
        Self::with_path(base.join(APP_DIR).join(FILE_NAME))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writes: Mutex::new(()),
        }
    }

    fn parse(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn render(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn ensure_parent(path: &Path) -> Result<(), ConfigError> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string())),
            _ => Ok(()),
        }
    }

    /// Replace the file in one rename. Callers hold `writes`.
    async fn replace(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = Self::render(config)?;
        Self::ensure_parent(&self.path).await?;

        let temp = self.temp_path();
        fs::write(&temp, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(ConfigError::WriteError(e.to_string()));
        }

        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(AppConfig::empty()),
            Err(e) => Err(ConfigError::ReadError(e.to_string())),
        }
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let _guard = self.writes.lock().await;
        self.replace(config).await
    }

    async fn update(&self, edit: ConfigEdit) -> Result<AppConfig, ConfigError> {
        let _guard = self.writes.lock().await;
        let mut config = self.load().await?;
        edit(&mut config);
        self.replace(&config).await?;
        Ok(config)
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        let _guard = self.writes.lock().await;
        let content = Self::render(&AppConfig::defaults())?;
        Self::ensure_parent(&self.path).await?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    ConfigError::AlreadyExists(self.path.to_string_lossy().to_string())
                }
                _ => ConfigError::WriteError(e.to_string()),
            })?;
        file.write_all(content.as_bytes())
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> XdgConfigStore {
        XdgConfigStore::with_path(dir.path().join(FILE_NAME))
    }

    #[test]
    fn default_path_ends_in_app_dir() {
        let path = XdgConfigStore::new().path();
        assert!(path.ends_with("nudge/config.toml"));
    }

    #[test]
    fn temp_file_sits_next_to_config() {
        let store = XdgConfigStore::with_path("/some/dir/config.toml");
        assert_eq!(store.temp_path(), PathBuf::from("/some/dir/config.toml.tmp"));
    }

    #[test]
    fn parse_flat_format() {
        let content = r#"
delay = 5
backend = "terminal"
app_name = "Reminders"
permission_mode = "consent"
permission = "granted"
"#;

        let config = XdgConfigStore::parse(content).unwrap();
        assert_eq!(config.delay, Some(5));
        assert_eq!(config.backend, Some("terminal".to_string()));
        assert_eq!(config.app_name, Some("Reminders".to_string()));
        assert_eq!(config.permission_mode, Some("consent".to_string()));
        assert_eq!(config.permission, Some("granted".to_string()));
    }

    #[test]
    fn parse_rejects_wrong_types() {
        let err = XdgConfigStore::parse("delay = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn render_skips_unset_fields() {
        let config = AppConfig {
            delay: Some(30),
            ..Default::default()
        };

        let toml = XdgConfigStore::render(&config).unwrap();
        assert!(toml.contains("delay = 30"));
        assert!(!toml.contains("permission"));
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let config = store_in(&dir).load().await.unwrap();
        assert!(config.delay.is_none());
        assert!(config.backend.is_none());
    }

    #[tokio::test]
    async fn save_creates_parent_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("nested/nudge/config.toml"));
        let config = AppConfig {
            delay: Some(12),
            permission: Some("denied".to_string()),
            ..Default::default()
        };

        store.save(&config).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded.delay, Some(12));
        assert_eq!(loaded.permission, Some("denied".to_string()));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn update_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save(&AppConfig {
                backend: Some("terminal".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let saved = store
            .update(Box::new(|config: &mut AppConfig| config.permission = Some("granted".to_string())))
            .await
            .unwrap();

        assert_eq!(saved.backend, Some("terminal".to_string()));
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.backend, Some("terminal".to_string()));
        assert_eq!(loaded.permission, Some("granted".to_string()));
    }

    #[tokio::test]
    async fn concurrent_updates_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(store_in(&dir));

        let delay = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store.update(Box::new(|c: &mut AppConfig| c.delay = Some(9))).await
            })
        };
        let permission = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .update(Box::new(|c: &mut AppConfig| c.permission = Some("denied".to_string())))
                    .await
            })
        };
        delay.await.unwrap().unwrap();
        permission.await.unwrap().unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.delay, Some(9));
        assert_eq!(loaded.permission, Some("denied".to_string()));
    }

    #[tokio::test]
    async fn init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.init().await.unwrap();
        assert!(store.exists());
        assert_eq!(store.load().await.unwrap().delay, Some(1));

        let err = store.init().await.unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
    }
}
