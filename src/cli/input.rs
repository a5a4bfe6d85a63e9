//! Line input from stdin
//!
//! Reads on a dedicated OS thread. A pending read on tokio's stdin would
//! keep the runtime from shutting down.

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc;
use tracing::debug;

/// Forward stdin lines over a channel. The channel closes at end of input.
pub fn spawn_stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    debug!(error = %e, "stopped reading stdin");
                    break;
                }
            }
        }
    });
    rx
}
