//! Per-submission state machine

use std::fmt;
use thiserror::Error;

/// Where a single submit press currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    PermissionChecking,
    Waiting,
    Fired,
}

impl SubmissionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PermissionChecking => "checking permission",
            Self::Waiting => "waiting",
            Self::Fired => "fired",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: SubmissionState,
    pub action: String,
}

/// One submission's lifecycle.
///
/// State machine:
///   IDLE -> PERMISSION_CHECKING (begin_check)
///   PERMISSION_CHECKING -> WAITING (grant)
///   PERMISSION_CHECKING -> IDLE (deny)
///   WAITING -> FIRED (fire)
///
/// There is no way back out of WAITING: a pending reminder cannot be
/// cancelled, only abandoned along with its screen.
#[derive(Debug, Default)]
pub struct Submission {
    state: SubmissionState,
}

impl Submission {
    /// Create a new submission in idle state
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
        }
    }

    /// A submission whose permission check already passed
    pub fn waiting() -> Self {
        Self {
            state: SubmissionState::Waiting,
        }
    }

    /// Get the current state
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SubmissionState::Idle
    }

    pub fn is_waiting(&self) -> bool {
        self.state == SubmissionState::Waiting
    }

    pub fn is_fired(&self) -> bool {
        self.state == SubmissionState::Fired
    }

    /// Transition from IDLE to PERMISSION_CHECKING
    pub fn begin_check(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            SubmissionState::Idle,
            SubmissionState::PermissionChecking,
            "check permission",
        )
    }

    /// Transition from PERMISSION_CHECKING to WAITING
    pub fn grant(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            SubmissionState::PermissionChecking,
            SubmissionState::Waiting,
            "start waiting",
        )
    }

    /// Transition from PERMISSION_CHECKING back to IDLE
    pub fn deny(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            SubmissionState::PermissionChecking,
            SubmissionState::Idle,
            "deny",
        )
    }

    /// Transition from WAITING to FIRED
    pub fn fire(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(SubmissionState::Waiting, SubmissionState::Fired, "fire")
    }

    fn transition(
        &mut self,
        from: SubmissionState,
        to: SubmissionState,
        action: &str,
    ) -> Result<(), InvalidStateTransition> {
        if self.state != from {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: action.to_string(),
            });
        }
        self.state = to;
        Ok(())
    }
}
