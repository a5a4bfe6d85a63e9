//! Permission adapter that asks the user once and remembers the answer
//!
//! The answer lives in the config file under `permission`. Prompts are not
//! rendered here: each one is handed to whichever front end holds the
//! receiving end of the prompt channel.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::application::ports::{ConfigStore, PermissionError, PermissionService};
use crate::domain::config::AppConfig;
use crate::domain::permission::StoredGrant;

/// A pending question for the user
#[derive(Debug)]
pub struct ConsentPrompt {
    reply: oneshot::Sender<bool>,
}

impl ConsentPrompt {
    /// Answer the prompt. Dropping it unanswered counts as dismissal.
    pub fn answer(self, granted: bool) {
        // The requester may have been torn down meanwhile
        let _ = self.reply.send(granted);
    }
}

/// Runtime permission backed by the config store
pub struct ConsentPermission<S: ConfigStore> {
    store: Arc<S>,
    prompts: mpsc::Sender<ConsentPrompt>,
}

impl<S: ConfigStore> ConsentPermission<S> {
    /// Create the service and the receiver the front end answers prompts from
    pub fn new(store: Arc<S>) -> (Self, mpsc::Receiver<ConsentPrompt>) {
        let (prompts, rx) = mpsc::channel(1);
        (Self { store, prompts }, rx)
    }

    async fn remember(&self, granted: bool) -> Result<(), PermissionError> {
        let answer = StoredGrant::from(granted).to_string();
        self.store
            .update(Box::new(move |config: &mut AppConfig| config.permission = Some(answer)))
            .await
            .map(|_| ())
            .map_err(|e| PermissionError::StoreFailed(e.to_string()))
    }
}

#[async_trait]
impl<S: ConfigStore + 'static> PermissionService for ConsentPermission<S> {
    fn is_required(&self) -> bool {
        true
    }

    async fn is_granted(&self) -> bool {
        match self.store.load().await {
            Ok(config) => config.stored_grant().is_some_and(|g| g.is_granted()),
            Err(e) => {
                warn!(error = %e, "could not read stored permission");
                false
            }
        }
    }

    async fn request(&self) -> Result<bool, PermissionError> {
        let (reply, answer) = oneshot::channel();
        self.prompts
            .send(ConsentPrompt { reply })
            .await
            .map_err(|_| PermissionError::PromptDismissed)?;

        let granted = answer.await.map_err(|_| PermissionError::PromptDismissed)?;
        debug!(granted, "permission prompt answered");

        self.remember(granted).await?;
        Ok(granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::XdgConfigStore;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> Arc<XdgConfigStore> {
        Arc::new(XdgConfigStore::with_path(dir.path().join("config.toml")))
    }

    #[tokio::test]
    async fn not_granted_without_stored_answer() {
        let dir = TempDir::new().unwrap();
        let (permission, _rx) = ConsentPermission::new(store_in(&dir));

        assert!(permission.is_required());
        assert!(!permission.is_granted().await);
    }

    #[tokio::test]
    async fn granted_answer_is_persisted() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let (permission, mut rx) = ConsentPermission::new(store.clone());

        let front_end = tokio::spawn(async move {
            let prompt = rx.recv().await.unwrap();
            prompt.answer(true);
        });

        assert!(permission.request().await.unwrap());
        front_end.await.unwrap();

        assert!(permission.is_granted().await);
        let config = store.load().await.unwrap();
        assert_eq!(config.permission, Some("granted".to_string()));
    }

    #[tokio::test]
    async fn denied_answer_is_persisted() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let (permission, mut rx) = ConsentPermission::new(store.clone());

        tokio::spawn(async move {
            rx.recv().await.unwrap().answer(false);
        });

        assert!(!permission.request().await.unwrap());
        assert!(!permission.is_granted().await);
        assert_eq!(store.load().await.unwrap().permission, Some("denied".to_string()));
    }

    #[tokio::test]
    async fn dropped_prompt_is_dismissal() {
        let dir = TempDir::new().unwrap();
        let (permission, mut rx) = ConsentPermission::new(store_in(&dir));

        tokio::spawn(async move {
            drop(rx.recv().await.unwrap());
        });

        let err = permission.request().await.unwrap_err();
        assert!(matches!(err, PermissionError::PromptDismissed));
        assert!(!permission.is_granted().await);
    }

    #[tokio::test]
    async fn no_front_end_is_dismissal() {
        let dir = TempDir::new().unwrap();
        let (permission, rx) = ConsentPermission::new(store_in(&dir));
        drop(rx);

        let err = permission.request().await.unwrap_err();
        assert!(matches!(err, PermissionError::PromptDismissed));
    }

    #[tokio::test]
    async fn revoking_in_config_is_seen_immediately() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let (permission, _rx) = ConsentPermission::new(store.clone());

        let mut config = store.load().await.unwrap();
        config.permission = Some("granted".to_string());
        store.save(&config).await.unwrap();
        assert!(permission.is_granted().await);

        config.permission = Some("denied".to_string());
        store.save(&config).await.unwrap();
        assert!(!permission.is_granted().await);
    }
}
