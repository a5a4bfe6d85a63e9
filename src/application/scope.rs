//! Lifecycle scope for screen-bound background work

use std::future::Future;
use std::sync::Mutex;

use thiserror::Error;
use tokio::task::JoinSet;
use tracing::debug;

/// Error when launching into a scope that has already been torn down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Screen has been closed; nothing more can be scheduled on it")]
pub struct ScopeClosed;

/// Owns every task a screen launches.
///
/// Tearing the scope down (explicitly or by dropping it) aborts whatever is
/// still running. Aborted tasks never resume, so a reminder whose wait was
/// cut short posts nothing.
pub struct LifecycleScope {
    tasks: Mutex<Option<JoinSet<()>>>,
}

impl LifecycleScope {
    /// Create an active scope
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(Some(JoinSet::new())),
        }
    }

    /// Spawn `task` on the current runtime, tied to this scope
    pub fn launch<F>(&self, task: F) -> Result<(), ScopeClosed>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut guard = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        let tasks = guard.as_mut().ok_or(ScopeClosed)?;

        // Reap finished tasks so the set does not grow without bound
        while tasks.try_join_next().is_some() {}

        tasks.spawn(task);
        Ok(())
    }

    /// Number of tasks that have not finished yet
    pub fn pending(&self) -> usize {
        let mut guard = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_mut() {
            Some(tasks) => {
                while tasks.try_join_next().is_some() {}
                tasks.len()
            }
            None => 0,
        }
    }

    /// Whether new work can still be launched
    pub fn is_active(&self) -> bool {
        self.tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Abort all pending tasks and refuse new ones
    pub fn teardown(&self) {
        let tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(mut tasks) = tasks {
            if !tasks.is_empty() {
                debug!(pending = tasks.len(), "tearing down scope");
            }
            tasks.abort_all();
        }
    }
}

impl Default for LifecycleScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LifecycleScope {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn launched_task_runs() {
        let scope = LifecycleScope::new();
        let (tx, rx) = tokio::sync::oneshot::channel();

        scope
            .launch(async move {
                let _ = tx.send(42);
            })
            .unwrap();

        assert_eq!(rx.await.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_aborts_pending_tasks() {
        let scope = LifecycleScope::new();
        let ran = Arc::new(AtomicBool::new(false));
        let ran_in_task = Arc::clone(&ran);

        scope
            .launch(async move {
                tokio::time::sleep(Duration::from_secs(10)).await;
                ran_in_task.store(true, Ordering::SeqCst);
            })
            .unwrap();
        assert_eq!(scope.pending(), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        scope.teardown();
        tokio::time::sleep(Duration::from_secs(20)).await;

        assert!(!ran.load(Ordering::SeqCst));
        assert!(!scope.is_active());
        assert_eq!(scope.pending(), 0);
    }

    #[tokio::test]
    async fn launch_after_teardown_fails() {
        let scope = LifecycleScope::new();
        scope.teardown();
        assert_eq!(scope.launch(async {}), Err(ScopeClosed));
    }

    #[tokio::test]
    async fn teardown_is_idempotent() {
        let scope = LifecycleScope::new();
        scope.teardown();
        scope.teardown();
        assert!(!scope.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn finished_tasks_are_reaped() {
        let scope = LifecycleScope::new();
        scope.launch(async {}).unwrap();
        scope.launch(async {}).unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(scope.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_scope_aborts_tasks() {
        let ran = Arc::new(AtomicBool::new(false));
        {
            let scope = LifecycleScope::new();
            let ran_in_task = Arc::clone(&ran);
            scope
                .launch(async move {
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    ran_in_task.store(true, Ordering::SeqCst);
                })
                .unwrap();
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!ran.load(Ordering::SeqCst));
    }
}
