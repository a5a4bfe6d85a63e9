//! Permission infrastructure module
//!
//! `NoRuntimePermission` for desktops, `ConsentPermission` for a
//! remembered ask-once grant.

mod consent;
mod none;

pub use consent::{ConsentPermission, ConsentPrompt};
pub use none::NoRuntimePermission;
