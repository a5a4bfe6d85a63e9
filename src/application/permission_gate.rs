//! Permission gate: decides whether a submission may proceed

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::permission::GrantState;

use super::ports::PermissionService;
use super::scope::LifecycleScope;

/// Receives the outcome of a permission prompt, once per prompt
pub type PermissionResultHandler = Arc<dyn Fn(GrantState) + Send + Sync>;

/// Checks the notification permission and, when missing, asks for it.
///
/// The prompt runs on the screen's scope; its answer goes to the handler
/// registered at construction, never back to the caller of
/// [`check_and_request`](Self::check_and_request). A denied user simply
/// submits again.
pub struct PermissionGate<P>
where
    P: PermissionService,
{
    service: Arc<P>,
    scope: Arc<LifecycleScope>,
    on_result: PermissionResultHandler,
    prompt_in_flight: Arc<AtomicBool>,
}

impl<P> PermissionGate<P>
where
    P: PermissionService + 'static,
{
    /// Create a gate that reports prompt outcomes to `on_result`
    pub fn new(
        service: Arc<P>,
        scope: Arc<LifecycleScope>,
        on_result: PermissionResultHandler,
    ) -> Self {
        Self {
            service,
            scope,
            on_result,
            prompt_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Current grant state. If it is not granted, the platform prompt is
    /// launched in the background and `Denied` is returned right away.
    pub async fn check_and_request(&self) -> GrantState {
        if !self.service.is_required() {
            return GrantState::NotRequired;
        }

        if self.service.is_granted().await {
            return GrantState::Granted;
        }

        self.launch_prompt();
        GrantState::Denied
    }

    /// Same check, made once when the screen opens
    pub async fn prompt_on_launch(&self) {
        let state = self.check_and_request().await;
        debug!(%state, "permission checked on launch");
    }

    /// Whether a prompt is currently waiting for the user
    pub fn is_prompting(&self) -> bool {
        self.prompt_in_flight.load(Ordering::SeqCst)
    }

    fn launch_prompt(&self) {
        if self.prompt_in_flight.swap(true, Ordering::SeqCst) {
            debug!("permission prompt already showing");
            return;
        }

        let service = Arc::clone(&self.service);
        let on_result = Arc::clone(&self.on_result);
        let in_flight = Arc::clone(&self.prompt_in_flight);

        let launched = self.scope.launch(async move {
            let state = match service.request().await {
                Ok(granted) => GrantState::from_answer(granted),
                Err(e) => {
                    warn!("permission prompt failed: {}", e);
                    GrantState::Denied
                }
            };
            in_flight.store(false, Ordering::SeqCst);
            on_result(state);
        });

        if launched.is_err() {
            self.prompt_in_flight.store(false, Ordering::SeqCst);
        }
    }
}
