//! Delivery of notifications to the configured chat.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

/// Command offered on the reply keyboard attached to error notifications.
pub const HOMEWORK_COMMAND: &str = "/homework";

/// A reply keyboard suggested alongside a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyKeyboard {
    /// Button rows, each a list of button labels.
    pub rows: Vec<Vec<String>>,
    /// Ask the client to shrink the keyboard to fit its buttons.
    pub resize: bool,
}

impl ReplyKeyboard {
    /// The single-button `/homework` keyboard.
    pub fn homework() -> Self {
        Self {
            rows: vec![vec![HOMEWORK_COMMAND.to_string()]],
            resize: true,
        }
    }
}

/// Error reported by a chat transport.
pub type SendError = Box<dyn std::error::Error + Send + Sync>;

/// Transport that puts a message into a chat.
#[async_trait]
pub trait ChatSender: Send + Sync {
    /// Send `text` to `chat_id`, optionally with a reply keyboard.
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&ReplyKeyboard>,
    ) -> Result<(), SendError>;
}

/// Sends notifications to a single chat, absorbing delivery failures.
#[derive(Clone)]
pub struct Notifier {
    sender: Arc<dyn ChatSender>,
    chat_id: i64,
}

impl Notifier {
    /// Create a notifier bound to one recipient.
    pub fn new(sender: Arc<dyn ChatSender>, chat_id: i64) -> Self {
        Self { sender, chat_id }
    }

    /// The recipient chat.
    pub fn chat_id(&self) -> i64 {
        self.chat_id
    }

    /// Send a plain text message. Returns whether delivery succeeded.
    pub async fn notify(&self, text: &str) -> bool {
        self.deliver(text, None).await
    }

    /// Send a message with a reply keyboard. Returns whether delivery succeeded.
    pub async fn notify_with_keyboard(&self, text: &str, keyboard: &ReplyKeyboard) -> bool {
        self.deliver(text, Some(keyboard)).await
    }

    async fn deliver(&self, text: &str, keyboard: Option<&ReplyKeyboard>) -> bool {
        info!(chat_id = self.chat_id, "Sending message");
        match self.sender.send(self.chat_id, text, keyboard).await {
            Ok(()) => {
                info!(chat_id = self.chat_id, message = %text, "Message sent");
                true
            }
            Err(e) => {
                error!(chat_id = self.chat_id, error = %e, "Failed to send message");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<(i64, String, Option<ReplyKeyboard>)>>,
        fail: bool,
    }

    #[async_trait]
    impl ChatSender for RecordingSender {
        async fn send(
            &self,
            chat_id: i64,
            text: &str,
            keyboard: Option<&ReplyKeyboard>,
        ) -> Result<(), SendError> {
            if self.fail {
                return Err("chat API unreachable".into());
            }
            self.sent
                .lock()
                .unwrap()
                .push((chat_id, text.to_string(), keyboard.cloned()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_notify_targets_configured_chat() {
        let sender = Arc::new(RecordingSender::default());
        let notifier = Notifier::new(sender.clone(), 77);

        assert!(notifier.notify("hello").await);

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], (77, "hello".to_string(), None));
    }

    #[tokio::test]
    async fn test_notify_with_keyboard() {
        let sender = Arc::new(RecordingSender::default());
        let notifier = Notifier::new(sender.clone(), 77);

        notifier
            .notify_with_keyboard("Program failure: x", &ReplyKeyboard::homework())
            .await;

        let sent = sender.sent.lock().unwrap();
        let keyboard = sent[0].2.as_ref().unwrap();
        assert_eq!(keyboard.rows, vec![vec!["/homework".to_string()]]);
        assert!(keyboard.resize);
    }

    #[tokio::test]
    async fn test_delivery_failure_is_swallowed() {
        let sender = Arc::new(RecordingSender {
            fail: true,
            ..Default::default()
        });
        let notifier = Notifier::new(sender, 77);

        assert!(!notifier.notify("lost").await);
    }
}
