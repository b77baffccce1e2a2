//! Duplicate suppression for outgoing notifications.
//!
//! Two independent channels:
//! - **status**: each distinct status message is delivered at most once per run
//! - **error**: an error message is delivered only when it differs from the
//!   previous one
//!
//! The seen set is never evicted, so it grows with the number of distinct
//! status messages over the life of the process.

use std::collections::HashSet;

use tracing::debug;

/// Tracks what has already been sent.
#[derive(Debug, Default)]
pub struct NotificationDeduper {
    /// Sent status messages, in delivery order.
    seen_order: Vec<String>,
    /// Lookup index over `seen_order`.
    seen: HashSet<String>,
    /// Most recent error message passed through the error channel.
    last_error: Option<String>,
}

impl NotificationDeduper {
    /// Create an empty deduper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Status channel. Returns true and records `text` if it was never seen.
    pub fn should_send(&mut self, text: &str) -> bool {
        if self.seen.contains(text) {
            debug!(message = %text, "Suppressing repeated status message");
            return false;
        }
        self.seen.insert(text.to_string());
        self.seen_order.push(text.to_string());
        true
    }

    /// Error channel. Returns true if `text` differs from the previous error.
    ///
    /// The slot is updated to `text` whether or not the message is suppressed.
    pub fn should_send_error(&mut self, text: &str) -> bool {
        let send = self.last_error.as_deref() != Some(text);
        if !send {
            debug!(message = %text, "Suppressing repeated error message");
        }
        self.last_error = Some(text.to_string());
        send
    }

    /// Status messages sent so far, oldest first.
    pub fn seen(&self) -> &[String] {
        &self.seen_order
    }

    /// The last error message, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
