//! Error types for the Telegram side of the bot.

use std::time::Duration;

use homework_core::ConfigError;
use thiserror::Error;

/// Errors that can occur in the Telegram bot.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Bot token rejected or Telegram unreachable at startup.
    #[error("Failed to start bot: {0}")]
    BotStartFailed(String),

    /// HTTP client for the review endpoint could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Telegram API call failed.
    #[error("Telegram API error: {0}")]
    Api(#[from] teloxide::RequestError),

    /// Telegram API call did not finish in time.
    #[error("Telegram API call timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for Telegram operations.
pub type Result<T> = std::result::Result<T, TelegramError>;
