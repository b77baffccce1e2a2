//! Latest known review status per homework.
//!
//! The poll loop publishes a [`StatusBoard`] snapshot after every record it
//! formats, so the chat command handlers can answer `/homework` without
//! touching the loop's own state.

use std::collections::BTreeMap;

use crate::formatter::{HomeworkStatus, StatusChange};

/// Reply used when no status has been observed yet.
pub const EMPTY_BOARD_MESSAGE: &str = "No review status changes seen yet.";

/// Latest status per homework name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBoard {
    entries: BTreeMap<String, HomeworkStatus>,
}

impl StatusBoard {
    /// Remember the status carried by `change`, replacing any earlier one.
    pub fn record(&mut self, change: &StatusChange) {
        self.entries.insert(change.name.clone(), change.status);
    }

    /// Status of a homework, if seen.
    pub fn get(&self, name: &str) -> Option<HomeworkStatus> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One line per homework, sorted by name.
    pub fn summary(&self) -> String {
        if self.entries.is_empty() {
            return EMPTY_BOARD_MESSAGE.to_string();
        }
        self.entries
            .iter()
            .map(|(name, status)| format!("\"{}\": {}", name, status.verdict()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(name: &str, status: HomeworkStatus) -> StatusChange {
        StatusChange {
            name: name.to_string(),
            status,
        }
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(StatusBoard::default().summary(), EMPTY_BOARD_MESSAGE);
    }

    #[test]
    fn test_latest_status_wins() {
        let mut board = StatusBoard::default();
        board.record(&change("hw1", HomeworkStatus::Reviewing));
        board.record(&change("hw1", HomeworkStatus::Approved));

        assert_eq!(board.len(), 1);
        assert_eq!(board.get("hw1"), Some(HomeworkStatus::Approved));
    }

    #[test]
    fn test_summary_sorted_by_name() {
        let mut board = StatusBoard::default();
        board.record(&change("b_project", HomeworkStatus::Rejected));
        board.record(&change("a_project", HomeworkStatus::Approved));

        let summary = board.summary();
        let lines: Vec<_> = summary.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("\"a_project\""));
        assert!(lines[1].ends_with(HomeworkStatus::Rejected.verdict()));
    }
}
