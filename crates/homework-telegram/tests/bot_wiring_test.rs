//! Integration tests for bot construction (no network access).

use std::time::Duration;

use homework_core::Config;
use homework_telegram::HomeworkBot;

fn config(extra: &[(&str, &str)]) -> Config {
    let mut vars = vec![
        ("PRACTICUM_TOKEN", "practicum"),
        ("TELEGRAM_TOKEN", "123456:ABC-DEF"),
        ("TELEGRAM_CHAT_ID", "98765"),
    ];
    vars.extend_from_slice(extra);
    Config::from_lookup(|name| {
        vars.iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.to_string())
    })
    .unwrap()
}

#[test]
fn test_notifier_targets_configured_chat() {
    let bot = HomeworkBot::new(config(&[]));
    assert_eq!(bot.notifier().chat_id(), 98765);
}

#[test]
fn test_poll_loop_uses_configured_interval_and_cursor() {
    let bot = HomeworkBot::new(config(&[("HOMEWORK_POLL_INTERVAL_SECS", "42")]));

    let poll = bot.poll_loop(Some(1_650_000_000)).unwrap();

    assert_eq!(poll.interval(), Duration::from_secs(42));
    assert_eq!(poll.cursor(), 1_650_000_000);
}

#[test]
fn test_poll_loop_cursor_defaults_to_now() {
    let bot = HomeworkBot::new(config(&[]));
    let before = homework_core::poll::unix_now();

    let poll = bot.poll_loop(None).unwrap();

    assert!(poll.cursor() >= before);
    assert_eq!(poll.interval(), Duration::from_secs(600));
}
