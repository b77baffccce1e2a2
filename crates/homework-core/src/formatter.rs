//! Turning homework records into notification text.

use std::fmt;
use std::str::FromStr;

use tracing::error;

use crate::error::RecordError;
use crate::validator::HomeworkRecord;

/// Key holding the homework's display name.
pub const NAME_FIELD: &str = "homework_name";

/// Key holding the review status.
pub const STATUS_FIELD: &str = "status";

/// Review state reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    /// Reviewed and accepted.
    Approved,
    /// Picked up by a reviewer.
    Reviewing,
    /// Reviewed, changes requested.
    Rejected,
}

/// Verdict sentence for each recognized status.
pub const VERDICTS: [(HomeworkStatus, &str); 3] = [
    (
        HomeworkStatus::Approved,
        "Reviewed: the reviewer liked everything. Hooray!",
    ),
    (
        HomeworkStatus::Reviewing,
        "The work has been taken for review by the reviewer.",
    ),
    (
        HomeworkStatus::Rejected,
        "Reviewed: the reviewer has remarks.",
    ),
];

impl HomeworkStatus {
    /// The wire value of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// The human-readable verdict for this status.
    pub fn verdict(&self) -> &'static str {
        VERDICTS
            .iter()
            .find(|(status, _)| status == self)
            .map(|(_, verdict)| *verdict)
            .unwrap_or_default()
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// A record that passed formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// Homework display name.
    pub name: String,
    /// Parsed review status.
    pub status: HomeworkStatus,
}

impl StatusChange {
    /// Validate a raw record.
    pub fn from_record(record: &HomeworkRecord) -> Result<Self, RecordError> {
        let name = required(record, NAME_FIELD)?;
        let raw_status = required(record, STATUS_FIELD)?;

        let status = raw_status.parse::<HomeworkStatus>().map_err(|()| {
            let err = RecordError::UnknownStatus {
                name: name.to_string(),
                status: raw_status.to_string(),
            };
            error!(error = %err, "Unexpected homework status");
            err
        })?;

        Ok(Self {
            name: name.to_string(),
            status,
        })
    }

    /// The notification sentence for this change.
    pub fn message(&self) -> String {
        format!(
            "Changed review status for \"{}\": {}",
            self.name,
            self.status.verdict()
        )
    }
}

fn required<'a>(record: &'a HomeworkRecord, field: &'static str) -> Result<&'a str, RecordError> {
    record.str_field(field).ok_or_else(|| {
        error!(field, "Expected key missing from homework record");
        RecordError::MissingField(field)
    })
}

/// Format a record into its notification text.
pub fn format(record: &HomeworkRecord) -> Result<String, RecordError> {
    StatusChange::from_record(record).map(|change| change.message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> HomeworkRecord {
        HomeworkRecord::new(value)
    }

    #[test]
    fn test_approved_message() {
        let text = format(&record(json!({"homework_name": "hw1", "status": "approved"}))).unwrap();
        assert_eq!(
            text,
            "Changed review status for \"hw1\": Reviewed: the reviewer liked everything. Hooray!"
        );
    }

    #[test]
    fn test_every_status_has_a_verdict() {
        for (status, verdict) in VERDICTS {
            assert_eq!(status.verdict(), verdict);
            assert_eq!(status.as_str().parse::<HomeworkStatus>(), Ok(status));

            let text = format(&record(json!({"homework_name": "x", "status": status.as_str()}))).unwrap();
            assert!(text.ends_with(verdict));
        }
    }

    #[test]
    fn test_extra_fields_ignored() {
        let change = StatusChange::from_record(&record(json!({
            "id": 123,
            "homework_name": "user__project.zip",
            "status": "rejected",
            "reviewer_comment": "see notes",
            "date_updated": "2024-01-01T10:00:00Z"
        })))
        .unwrap();
        assert_eq!(change.name, "user__project.zip");
        assert_eq!(change.status, HomeworkStatus::Rejected);
    }

    #[test]
    fn test_unknown_status() {
        let err = format(&record(json!({"homework_name": "hw2", "status": "unknown"}))).unwrap_err();
        assert_eq!(
            err,
            RecordError::UnknownStatus {
                name: "hw2".into(),
                status: "unknown".into()
            }
        );
    }

    #[test]
    fn test_status_is_case_sensitive() {
        let err = format(&record(json!({"homework_name": "hw", "status": "Approved"}))).unwrap_err();
        assert!(matches!(err, RecordError::UnknownStatus { .. }));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            format(&record(json!({"status": "approved"}))),
            Err(RecordError::MissingField(NAME_FIELD))
        );
        assert_eq!(
            format(&record(json!({"homework_name": "hw1"}))),
            Err(RecordError::MissingField(STATUS_FIELD))
        );
        assert_eq!(
            format(&record(json!({"homework_name": "hw1", "status": 3}))),
            Err(RecordError::MissingField(STATUS_FIELD))
        );
        assert_eq!(
            format(&record(json!("not a record"))),
            Err(RecordError::MissingField(NAME_FIELD))
        );
    }
}
