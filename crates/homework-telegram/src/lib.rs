//! Telegram interface for the homework review bot.
//!
//! This crate connects the polling logic from `homework-core` to Telegram:
//! status changes and errors are delivered to one configured chat, and the
//! bot answers a couple of commands from that chat.
//!
//! # Environment Variables
//!
//! Required:
//! - `PRACTICUM_TOKEN`: OAuth token for the review-status API
//! - `TELEGRAM_TOKEN`: Bot token from @BotFather
//! - `TELEGRAM_CHAT_ID`: Chat that receives notifications
//!
//! Optional:
//! - `PRACTICUM_ENDPOINT`, `HOMEWORK_POLL_INTERVAL_SECS`,
//!   `HOMEWORK_HTTP_TIMEOUT_SECS` (see `homework_core::config`)
//!
//! # Example
//!
//! ```no_run
//! use homework_telegram::{HomeworkBot, RunOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bot = HomeworkBot::from_env()?;
//!     bot.run(RunOptions { since: None, commands: true }).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Commands
//!
//! - `/start` - Greeting and the `/homework` button
//! - `/homework` - Latest review status of each homework seen so far

pub mod bot;
pub mod error;
pub mod handlers;
pub mod sender;

pub use bot::{HomeworkBot, RunOptions};
pub use error::{Result, TelegramError};
pub use handlers::Command;
pub use sender::TelegramSender;
