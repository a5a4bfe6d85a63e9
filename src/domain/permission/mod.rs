//! Permission domain module

mod grant;

pub use grant::{GrantState, ParsePermissionError, PermissionMode, StoredGrant};
