//! Notification permission port interface

use async_trait::async_trait;
use thiserror::Error;

/// Permission errors
#[derive(Debug, Clone, Error)]
pub enum PermissionError {
    #[error("Permission prompt closed without an answer")]
    PromptDismissed,

    #[error("Failed to remember permission answer: {0}")]
    StoreFailed(String),
}

/// Port for the platform permission service
#[async_trait]
pub trait PermissionService: Send + Sync {
    /// Whether the platform gates notifications behind a runtime permission
    fn is_required(&self) -> bool;

    /// Current grant, as the platform sees it right now
    async fn is_granted(&self) -> bool;

    /// Show the platform prompt and wait for the user's answer.
    ///
    /// # Returns
    /// `Ok(true)` if the user allowed notifications
    async fn request(&self) -> Result<bool, PermissionError>;
}

/// Blanket implementation for boxed permission services
#[async_trait]
impl PermissionService for Box<dyn PermissionService> {
    fn is_required(&self) -> bool {
        self.as_ref().is_required()
    }

    async fn is_granted(&self) -> bool {
        self.as_ref().is_granted().await
    }

    async fn request(&self) -> Result<bool, PermissionError> {
        self.as_ref().request().await
    }
}
