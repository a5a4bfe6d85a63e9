//! Submission domain module

mod session;

pub use session::{InvalidStateTransition, Submission, SubmissionState};
