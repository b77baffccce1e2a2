//! Command handlers for the Telegram bot.

use std::sync::Arc;

use homework_core::{ReplyKeyboard, StatusBoard};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::sender::keyboard_markup;

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot and show the homework button")]
    Start,

    #[command(description = "Show the latest review status of each homework")]
    Homework,
}

/// What the command handlers need from the rest of the bot.
pub struct CommandContext {
    /// The only chat the bot answers.
    pub chat_id: i64,
    /// Latest statuses published by the poll loop.
    pub board: watch::Receiver<StatusBoard>,
}

impl CommandContext {
    pub fn new(chat_id: i64, board: watch::Receiver<StatusBoard>) -> Self {
        Self { chat_id, board }
    }

    /// Whether a message comes from the configured chat.
    pub fn is_recipient(&self, chat: ChatId) -> bool {
        chat.0 == self.chat_id
    }
}

/// Text of the `/start` reply.
pub fn start_text() -> String {
    format!(
        "Hi! I check your homework review status every few minutes and \
        message you when it changes.\n\n{}",
        Command::descriptions()
    )
}

/// Text of the `/homework` reply.
pub fn homework_text(board: &StatusBoard) -> String {
    board.summary()
}

/// Dispatch a parsed command.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    ctx: Arc<CommandContext>,
) -> ResponseResult<()> {
    if !ctx.is_recipient(msg.chat.id) {
        debug!(chat_id = %msg.chat.id, "Ignoring command from unknown chat");
        return Ok(());
    }

    match cmd {
        Command::Start => handle_start(bot, msg).await,
        Command::Homework => handle_homework(bot, msg, ctx).await,
    }
}

/// Handle the /start command.
pub async fn handle_start(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, start_text())
        .reply_markup(keyboard_markup(&ReplyKeyboard::homework()))
        .await?;

    info!(chat_id = %msg.chat.id, user = ?msg.from.as_ref().map(|u| &u.username), "User started bot");
    Ok(())
}

/// Handle the /homework command.
pub async fn handle_homework(
    bot: Bot,
    msg: Message,
    ctx: Arc<CommandContext>,
) -> ResponseResult<()> {
    let text = homework_text(&ctx.board.borrow());
    bot.send_message(msg.chat.id, text).await?;

    info!(chat_id = %msg.chat.id, "Sent homework status summary");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use homework_core::board::EMPTY_BOARD_MESSAGE;
    use homework_core::{HomeworkStatus, StatusChange};

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/start", "homework_bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/homework", "homework_bot").unwrap(), Command::Homework);
        assert!(Command::parse("/connect x", "homework_bot").is_err());
    }

    #[test]
    fn test_start_text_lists_commands() {
        let text = start_text();
        assert!(text.contains("/start"));
        assert!(text.contains("/homework"));
    }

    #[test]
    fn test_homework_text_follows_board() {
        let (tx, rx) = watch::channel(StatusBoard::default());
        let ctx = CommandContext::new(5, rx);
        assert_eq!(homework_text(&ctx.board.borrow()), EMPTY_BOARD_MESSAGE);

        tx.send_modify(|board| {
            board.record(&StatusChange {
                name: "hw1".into(),
                status: HomeworkStatus::Approved,
            })
        });

        let text = homework_text(&ctx.board.borrow());
        assert!(text.contains("\"hw1\""));
        assert!(text.contains(HomeworkStatus::Approved.verdict()));
    }

    #[test]
    fn test_only_configured_chat_is_answered() {
        let (_tx, rx) = watch::channel(StatusBoard::default());
        let ctx = CommandContext::new(42, rx);
        assert!(ctx.is_recipient(ChatId(42)));
        assert!(!ctx.is_recipient(ChatId(43)));
    }
}
