//! Homework review bot binary.
//!
//! Start the bot with:
//! ```bash
//! PRACTICUM_TOKEN=xxx TELEGRAM_TOKEN=yyy TELEGRAM_CHAT_ID=123 cargo run -p homework-telegram
//! ```

use clap::Parser;
use homework_core::{config, Config, CycleOutcome};
use homework_telegram::{HomeworkBot, RunOptions};
use tracing_subscriber::EnvFilter;

/// Homework review bot - get Telegram messages when your review status changes
#[derive(Parser, Debug)]
#[command(name = "homework-bot")]
#[command(about = "Polls the homework review API and reports status changes to Telegram")]
struct Args {
    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,

    /// Initial cursor as a Unix timestamp (default: now)
    #[arg(long, value_name = "UNIX_TS")]
    since: Option<i64>,

    /// Do not answer /start and /homework
    #[arg(long)]
    no_commands: bool,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let loaded = config::load_env_files();

    // RUST_LOG wins over -v
    let filter = match args.verbose {
        0 => "homework_core=info,homework_telegram=info,teloxide=warn",
        1 => "homework_core=debug,homework_telegram=debug,teloxide=info",
        2 => "homework_core=trace,homework_telegram=trace,teloxide=debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    for path in &loaded {
        tracing::debug!(path = %path.display(), "Environment file loaded");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(severity = "critical", error = %e, "Cannot start without configuration");
            return Err(e.into());
        }
    };
    tracing::debug!(config = ?config, "Configuration loaded");

    let bot = HomeworkBot::new(config);

    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
            println!("\n[robot] Homework Review Bot");
            println!("   Bot: @{}", username);
            println!("   Endpoint: {}", bot.config().endpoint);
            println!("   Interval: {}s", bot.config().poll_interval.as_secs());
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    if args.once {
        return match bot.run_once(args.since).await? {
            CycleOutcome::Completed(stats) => {
                println!(
                    "   Cycle completed: {} records, {} sent, {} already sent",
                    stats.records, stats.delivered, stats.suppressed
                );
                Ok(())
            }
            CycleOutcome::Failed { error, .. } => Err(error.into()),
        };
    }

    println!("\n   Press Ctrl+C to stop\n");

    bot.run(RunOptions {
        since: args.since,
        commands: !args.no_commands,
    })
    .await?;

    Ok(())
}
