//! Nudge - delayed desktop reminders
//!
//! Type a message, pick a delay between 1 and 60 seconds, and get a
//! notification once the delay has passed.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Delay, draft, notification and permission value objects, errors
//! - **Application**: The reminder screen, permission gate, scheduler, and port traits
//! - **Infrastructure**: Adapter implementations (notify-rust, notify-send, config file)
//! - **CLI**: Command-line interface, interactive screen, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
