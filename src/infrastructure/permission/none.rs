//! Permission adapter for platforms without a runtime notification permission

use async_trait::async_trait;

use crate::application::ports::{PermissionError, PermissionService};

/// Desktop default: posting is always allowed and nothing is ever asked
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRuntimePermission;

impl NoRuntimePermission {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PermissionService for NoRuntimePermission {
    fn is_required(&self) -> bool {
        false
    }

    async fn is_granted(&self) -> bool {
        true
    }

    async fn request(&self) -> Result<bool, PermissionError> {
        Ok(true)
    }
}
