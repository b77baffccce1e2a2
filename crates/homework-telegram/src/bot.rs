//! Wiring of the poll loop, Telegram delivery and command listener.

use std::sync::Arc;

use homework_core::{Config, CycleOutcome, Notifier, PollLoop, StatusClient};
use teloxide::prelude::*;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{Result, TelegramError};
use crate::handlers::{handle_command, Command, CommandContext};
use crate::sender::TelegramSender;

/// Options for a bot run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Initial cursor; the current time when unset.
    pub since: Option<i64>,
    /// Answer `/start` and `/homework` while polling.
    pub commands: bool,
}

/// The homework review bot.
pub struct HomeworkBot {
    /// The teloxide bot instance.
    bot: Bot,
    /// Loaded configuration.
    config: Config,
}

impl HomeworkBot {
    /// Create a bot from loaded configuration.
    pub fn new(config: Config) -> Self {
        let bot = Bot::new(config.telegram_token.clone());
        Self { bot, config }
    }

    /// Create a bot from the process environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Config::from_env()?))
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| TelegramError::BotStartFailed(e.to_string()))?;
        Ok(me.username().to_string())
    }

    /// Notifier delivering to the configured chat through Telegram.
    pub fn notifier(&self) -> Notifier {
        let sender = TelegramSender::new(self.bot.clone(), self.config.http_timeout);
        Notifier::new(Arc::new(sender), self.config.chat_id)
    }

    /// Build the poll loop against the configured endpoint.
    pub fn poll_loop(&self, since: Option<i64>) -> Result<PollLoop<StatusClient>> {
        let client = StatusClient::from_config(&self.config)
            .map_err(|e| TelegramError::HttpClient(e.to_string()))?;

        let poll = PollLoop::new(client, self.notifier()).with_interval(self.config.poll_interval);
        Ok(match since {
            Some(cursor) => poll.with_cursor(cursor),
            None => poll,
        })
    }

    /// Run a single poll cycle.
    pub async fn run_once(&self, since: Option<i64>) -> Result<CycleOutcome> {
        let mut poll = self.poll_loop(since)?;
        Ok(poll.run_cycle().await)
    }

    /// Poll until Ctrl+C, optionally answering chat commands meanwhile.
    pub async fn run(&self, options: RunOptions) -> Result<()> {
        let mut poll = self.poll_loop(options.since)?;

        let listener = if options.commands {
            let ctx = CommandContext::new(self.config.chat_id, poll.subscribe());
            Some(self.spawn_command_listener(ctx))
        } else {
            info!("Command listener disabled");
            None
        };

        tokio::select! {
            _ = poll.run() => {}
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    warn!(error = %e, "Failed to listen for Ctrl+C");
                }
                info!("Shutting down");
            }
        }

        if let Some(handle) = listener {
            handle.abort();
        }
        Ok(())
    }

    /// Start the teloxide dispatcher for `/start` and `/homework`.
    fn spawn_command_listener(&self, ctx: CommandContext) -> JoinHandle<()> {
        let bot = self.bot.clone();
        let ctx = Arc::new(ctx);

        let handler = Update::filter_message()
            .filter_command::<Command>()
            .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                let ctx = Arc::clone(&ctx);
                info!(chat_id = %msg.chat.id, "Command matched: {:?}", cmd);
                async move { handle_command(bot, msg, cmd, ctx).await }
            });

        info!("Command listener running");
        tokio::spawn(async move {
            Dispatcher::builder(bot, handler)
                .default_handler(|upd| async move {
                    debug!("Unhandled update: {:?}", upd);
                })
                .build()
                .dispatch()
                .await;
        })
    }
}
