//! Runtime configuration for the homework bot.
//!
//! Secrets and tunables come from the process environment, optionally seeded
//! from a `.env` file:
//!
//! ```text
//! ~/.homework-bot/.env    # or $HOMEWORK_CONFIG_DIR/.env
//! ./.env                  # local override for development
//! ```
//!
//! # Environment Variables
//!
//! Required:
//! - `PRACTICUM_TOKEN`: OAuth token for the review-status API
//! - `TELEGRAM_TOKEN`: Bot token from @BotFather
//! - `TELEGRAM_CHAT_ID`: Chat that receives notifications
//!
//! Optional:
//! - `PRACTICUM_ENDPOINT`: Review-status endpoint (default: Practicum API)
//! - `HOMEWORK_POLL_INTERVAL_SECS`: Seconds between polls (default: 600)
//! - `HOMEWORK_HTTP_TIMEOUT_SECS`: Timeout for outbound requests (default: 10)
//! - `HOMEWORK_CONFIG_DIR`: Directory holding the `.env` file

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, error};
use url::Url;

use crate::error::{ConfigError, Result};

/// Environment variable holding the review API token.
pub const PRACTICUM_TOKEN_ENV: &str = "PRACTICUM_TOKEN";

/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_TOKEN";

/// Environment variable holding the recipient chat id.
pub const TELEGRAM_CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Environment variable overriding the review endpoint.
pub const ENDPOINT_ENV: &str = "PRACTICUM_ENDPOINT";

/// Environment variable overriding the poll interval.
pub const POLL_INTERVAL_ENV: &str = "HOMEWORK_POLL_INTERVAL_SECS";

/// Environment variable overriding the outbound request timeout.
pub const HTTP_TIMEOUT_ENV: &str = "HOMEWORK_HTTP_TIMEOUT_SECS";

/// Environment variable for a custom config directory.
pub const CONFIG_DIR_ENV: &str = "HOMEWORK_CONFIG_DIR";

/// Default review-status endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default pause between poll cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);

/// Default timeout for the status fetch and for chat delivery.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Default config directory name under home.
const DEFAULT_CONFIG_DIR: &str = ".homework-bot";

/// Get the config directory.
///
/// Defaults to `~/.homework-bot/` or `HOMEWORK_CONFIG_DIR` env var.
pub fn config_dir() -> PathBuf {
    std::env::var(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_CONFIG_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR))
        })
}

/// Get the `.env` file inside the config directory.
pub fn env_file() -> PathBuf {
    config_dir().join(".env")
}

/// Load `.env` files into the process environment.
///
/// The config-directory file is read first, then `./.env`. Variables that
/// are already set are never overwritten. Returns the files that were loaded.
pub fn load_env_files() -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    let path = env_file();
    if load_env_file(&path) {
        loaded.push(path);
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "Loaded local .env");
            loaded.push(path);
        }
        Err(e) if e.not_found() => {}
        Err(e) => error!(error = %e, "Failed to load local .env"),
    }

    loaded
}

/// Load a single `.env` file if it exists. Returns whether it was loaded.
pub fn load_env_file(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Loaded env file");
            true
        }
        Err(e) => {
            error!(error = %e, path = %path.display(), "Failed to load env file");
            false
        }
    }
}

/// Everything the bot needs to run.
#[derive(Clone)]
pub struct Config {
    /// OAuth token for the review-status API.
    pub practicum_token: String,
    /// Telegram bot token.
    pub telegram_token: String,
    /// The single chat that receives notifications.
    pub chat_id: i64,
    /// Review-status endpoint.
    pub endpoint: Url,
    /// Pause between poll cycles.
    pub poll_interval: Duration,
    /// Timeout applied to outbound requests.
    pub http_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("endpoint", &self.endpoint.as_str())
            .field("poll_interval", &self.poll_interval)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Every missing required variable is logged and reported together, so a
    /// single startup attempt shows the whole problem.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let practicum_token = get(PRACTICUM_TOKEN_ENV);
        let telegram_token = get(TELEGRAM_TOKEN_ENV);
        let chat_id = get(TELEGRAM_CHAT_ID_ENV);

        let mut missing = Vec::new();
        for (name, value) in [
            (PRACTICUM_TOKEN_ENV, &practicum_token),
            (TELEGRAM_TOKEN_ENV, &telegram_token),
            (TELEGRAM_CHAT_ID_ENV, &chat_id),
        ] {
            if value.is_none() {
                error!(severity = "critical", variable = name, "Missing required environment variable");
                missing.push(name);
            }
        }

        let (Some(practicum_token), Some(telegram_token), Some(chat_id)) =
            (practicum_token, telegram_token, chat_id)
        else {
            return Err(ConfigError::Missing(missing));
        };

        let chat_id = chat_id
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidChatId(chat_id.clone()))?;

        let endpoint = match get(ENDPOINT_ENV) {
            Some(value) => Url::parse(value.trim())
                .map_err(|source| ConfigError::InvalidEndpoint { value, source })?,
            None => Url::parse(DEFAULT_ENDPOINT).map_err(|source| ConfigError::InvalidEndpoint {
                value: DEFAULT_ENDPOINT.to_string(),
                source,
            })?,
        };

        let poll_interval = parse_secs(POLL_INTERVAL_ENV, get(POLL_INTERVAL_ENV), DEFAULT_POLL_INTERVAL)?;
        let http_timeout = parse_secs(HTTP_TIMEOUT_ENV, get(HTTP_TIMEOUT_ENV), DEFAULT_HTTP_TIMEOUT)?;

        Ok(Self {
            practicum_token,
            telegram_token,
            chat_id,
            endpoint,
            poll_interval,
            http_timeout,
        })
    }
}

fn parse_secs(name: &'static str, value: Option<String>, default: Duration) -> Result<Duration> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue { name, value }),
    }
}
