//! Telegram implementation of the chat transport.

use std::time::Duration;

use async_trait::async_trait;
use homework_core::{ChatSender, ReplyKeyboard, SendError};
use teloxide::prelude::*;
use teloxide::types::{KeyboardButton, KeyboardMarkup};
use tracing::debug;

use crate::error::TelegramError;

/// Sends messages through the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramSender {
    bot: Bot,
    timeout: Duration,
}

impl TelegramSender {
    /// Wrap a bot; every send is bounded by `timeout`.
    pub fn new(bot: Bot, timeout: Duration) -> Self {
        Self { bot, timeout }
    }
}

/// Convert a keyboard description into Telegram's reply markup.
pub fn keyboard_markup(keyboard: &ReplyKeyboard) -> KeyboardMarkup {
    let rows = keyboard
        .rows
        .iter()
        .map(|row| row.iter().map(|label| KeyboardButton::new(label.as_str())).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    let markup = KeyboardMarkup::new(rows);
    if keyboard.resize {
        markup.resize_keyboard()
    } else {
        markup
    }
}

#[async_trait]
impl ChatSender for TelegramSender {
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&ReplyKeyboard>,
    ) -> Result<(), SendError> {
        let mut req = self.bot.send_message(ChatId(chat_id), text.to_string());
        if let Some(kb) = keyboard {
            req = req.reply_markup(keyboard_markup(kb));
        }

        match tokio::time::timeout(self.timeout, req.send()).await {
            Ok(Ok(sent)) => {
                debug!(chat_id, message_id = sent.id.0, "Telegram accepted message");
                Ok(())
            }
            Ok(Err(e)) => Err(Box::new(TelegramError::Api(e))),
            Err(_) => Err(Box::new(TelegramError::Timeout(self.timeout))),
        }
    }
}
