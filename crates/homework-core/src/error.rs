//! Error types for the review-status watcher.
//!
//! Each stage of a poll cycle fails with its own error kind. None of them is
//! fatal to the loop: [`PollError`] collects them so the loop can turn any
//! failure into a user-facing message. Only [`ConfigError`] aborts startup.

use thiserror::Error;

/// Errors raised while fetching the review-status payload.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Endpoint answered with something other than 200 OK.
    #[error("endpoint {url} returned HTTP {status}")]
    Status {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Endpoint URL that was queried.
        url: String,
    },

    /// Request never produced a response (DNS, connect, timeout, ...).
    #[error("endpoint {url} is unreachable: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not valid JSON.
    #[error("endpoint {url} returned a body that is not JSON (HTTP {status}): {source}")]
    Decode {
        status: u16,
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// HTTP status associated with the failure, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } | FetchError::Decode { status, .. } => Some(*status),
            FetchError::Transport { .. } => None,
        }
    }

    /// Endpoint URL the failure relates to.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Status { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

/// The payload does not have the expected top-level structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Payload is a JSON value other than an object.
    #[error("API response is not an object (got {0})")]
    NotAnObject(&'static str),

    /// Payload is an empty object.
    #[error("API response is empty")]
    Empty,

    /// Payload has no `homeworks` key.
    #[error("API response has no `homeworks` key")]
    MissingHomeworks,

    /// `homeworks` is present but is not a list.
    #[error("`homeworks` in API response is not a list (got {0})")]
    HomeworksNotAList(&'static str),
}

/// A single homework record could not be turned into a notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required key is absent or not a string.
    #[error("homework record has no `{0}` field")]
    MissingField(&'static str),

    /// `status` is not one of the recognized review states.
    #[error("unknown homework status `{status}` for \"{name}\"")]
    UnknownStatus { name: String, status: String },
}

/// Any failure that ends a poll cycle in the error-handling branch.
#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Startup configuration problems. These abort the process before polling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required environment variables are not set.
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    /// `TELEGRAM_CHAT_ID` is not an integer.
    #[error("TELEGRAM_CHAT_ID must be an integer chat id, got `{0}`")]
    InvalidChatId(String),

    /// Endpoint override is not a valid URL.
    #[error("invalid endpoint URL `{value}`: {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// A numeric setting could not be parsed.
    #[error("{name} must be a positive integer, got `{value}`")]
    InvalidValue { name: &'static str, value: String },
}

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
