//! Homework Core - review-status polling and notification logic.
//!
//! This crate contains everything the homework bot does apart from talking
//! to a concrete chat service:
//!
//! - **client**: Fetch review statuses from the HTTP endpoint
//! - **validator**: Check the payload shape and extract homework records
//! - **formatter**: Map a record's status to a human-readable verdict
//! - **dedup**: Suppress repeated status and error notifications
//! - **notifier**: Deliver messages to the configured chat, absorbing failures
//! - **poll**: The fixed-interval loop tying the above together
//! - **board**: Latest known status per homework, for command replies
//! - **config**: Environment-based configuration
//!
//! Chat delivery is abstracted behind [`ChatSender`]; the Telegram
//! implementation lives in the `homework-telegram` crate.

pub mod board;
pub mod client;
pub mod config;
pub mod dedup;
pub mod error;
pub mod formatter;
pub mod notifier;
pub mod poll;
pub mod validator;

pub use board::StatusBoard;
pub use client::{StatusClient, StatusSource};
pub use config::{load_env_files, Config};
pub use dedup::NotificationDeduper;
pub use error::{ConfigError, FetchError, PollError, RecordError, ShapeError};
pub use formatter::{format, HomeworkStatus, StatusChange};
pub use notifier::{ChatSender, Notifier, ReplyKeyboard, SendError, HOMEWORK_COMMAND};
pub use poll::{CycleOutcome, CycleStats, PollLoop};
pub use validator::{validate, HomeworkRecord};
