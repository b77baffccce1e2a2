//! The polling loop.
//!
//! Each cycle fetches the statuses changed since the cursor, validates the
//! payload, formats every record and delivers the messages that were not
//! sent before. Any failure lands in the error branch, which reports it once
//! per distinct message and leaves the cursor where it was.
//!
//! ```text
//! Fetching ─▶ Validating ─▶ Processing ─▶ Sleeping ─▶ Fetching ...
//!     │            │             │
//!     └────────────┴─────────────┴─▶ ErrorHandling ─▶ Sleeping
//! ```
//!
//! A record that cannot be formatted does not stop the others in the same
//! payload from being delivered; the first such failure is reported after
//! the remaining records are processed.


use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::board::StatusBoard;
use crate::client::StatusSource;
use crate::config::DEFAULT_POLL_INTERVAL;
use crate::dedup::NotificationDeduper;
use crate::error::{PollError, RecordError};
use crate::formatter::StatusChange;
use crate::notifier::{Notifier, ReplyKeyboard};
use crate::validator;

/// Prefix of every error notification.
pub const ERROR_PREFIX: &str = "Program failure";

/// Current Unix time in seconds.
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Build the user-facing text for a failed cycle.
pub fn error_message(error: &PollError) -> String {
    format!("{}: {}", ERROR_PREFIX, error)
}

/// Counters for a completed cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Records in the payload.
    pub records: usize,
    /// New status messages handed to the notifier.
    pub delivered: usize,
    /// Status messages suppressed as already sent.
    pub suppressed: usize,
}

/// Result of one poll cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The cycle succeeded and the cursor moved forward.
    Completed(CycleStats),
    /// The cycle ended in the error branch.
    Failed {
        error: PollError,
        /// Whether an error notification was handed to the notifier.
        reported: bool,
    },
}

impl CycleOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, CycleOutcome::Completed(_))
    }
}

/// Fixed-interval poller that owns all notification state.
pub struct PollLoop<S> {
    source: S,
    notifier: Notifier,
    dedup: NotificationDeduper,
    cursor: i64,
    interval: Duration,
    board: watch::Sender<StatusBoard>,
}

impl<S: StatusSource> PollLoop<S> {
    /// Create a loop whose cursor starts at the current time.
    pub fn new(source: S, notifier: Notifier) -> Self {
        let (board, _) = watch::channel(StatusBoard::default());
        Self {
            source,
            notifier,
            dedup: NotificationDeduper::new(),
            cursor: unix_now(),
            interval: DEFAULT_POLL_INTERVAL,
            board,
        }
    }

    /// Set the pause between cycles.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start the cursor at an explicit Unix timestamp.
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    /// Lower bound of the next fetch window.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Pause between cycles.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Notification history.
    pub fn dedup(&self) -> &NotificationDeduper {
        &self.dedup
    }

    /// Receive snapshots of the latest status per homework.
    pub fn subscribe(&self) -> watch::Receiver<StatusBoard> {
        self.board.subscribe()
    }

    /// Poll forever, sleeping the fixed interval after every cycle.
    pub async fn run(&mut self) {
        info!(
            interval_secs = self.interval.as_secs(),
            cursor = self.cursor,
            "Starting review status polling"
        );
        loop {
            self.run_cycle().await;
            debug!(interval_secs = self.interval.as_secs(), "Sleeping until next poll");
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Run one fetch/validate/process cycle, including error handling.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll().await {
            Ok(stats) => {
                self.cursor = unix_now();
                info!(
                    records = stats.records,
                    delivered = stats.delivered,
                    suppressed = stats.suppressed,
                    cursor = self.cursor,
                    "Poll cycle completed"
                );
                CycleOutcome::Completed(stats)
            }
            Err(error) => {
                let reported = self.report_error(&error).await;
                CycleOutcome::Failed { error, reported }
            }
        }
    }

    async fn poll(&mut self) -> Result<CycleStats, PollError> {
        let payload = self.source.fetch(self.cursor).await?;
        let records = validator::validate(&payload)?;

        let mut stats = CycleStats {
            records: records.len(),
            ..Default::default()
        };
        let mut first_failure: Option<RecordError> = None;

        for record in &records {
            let change = match StatusChange::from_record(record) {
                Ok(change) => change,
                Err(e) => {
                    warn!(error = %e, "Skipping malformed homework record");
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                    continue;
                }
            };

            self.board.send_modify(|board| board.record(&change));

            let text = change.message();
            if self.dedup.should_send(&text) {
                self.notifier.notify(&text).await;
                stats.delivered += 1;
            } else {
                stats.suppressed += 1;
            }
        }

        match first_failure {
            Some(e) => Err(e.into()),
            None => Ok(stats),
        }
    }

    async fn report_error(&mut self, error: &PollError) -> bool {
        let message = error_message(error);
        error!(error = %error, cursor = self.cursor, "Poll cycle failed");

        if !self.dedup.should_send_error(&message) {
            return false;
        }
        self.notifier
            .notify_with_keyboard(&message, &ReplyKeyboard::homework())
            .await;
        true
    }
}
