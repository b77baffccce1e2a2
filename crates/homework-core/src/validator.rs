//! Structural validation of the review-status payload.

use serde_json::{Map, Value};
use tracing::error;

use crate::error::ShapeError;

/// One element of the `homeworks` list.
///
/// Records are passed through as received; field checks happen when the
/// record is formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeworkRecord(Value);

impl HomeworkRecord {
    /// Wrap a raw JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Get a string field, if the record is an object and the field is a string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.as_object()?.get(key)?.as_str()
    }

    /// The raw JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for HomeworkRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Check the payload shape and extract the homework records in order.
pub fn validate(payload: &Value) -> Result<Vec<HomeworkRecord>, ShapeError> {
    let map = match payload {
        Value::Object(map) => map,
        other => {
            let err = ShapeError::NotAnObject(json_kind(other));
            error!(error = %err, "Unexpected API response");
            return Err(err);
        }
    };

    homeworks(map)
        .map(|list| list.iter().cloned().map(HomeworkRecord).collect())
        .inspect_err(|err| error!(error = %err, "Unexpected API response"))
}

fn homeworks(map: &Map<String, Value>) -> Result<&Vec<Value>, ShapeError> {
    if map.is_empty() {
        return Err(ShapeError::Empty);
    }
    match map.get("homeworks") {
        None => Err(ShapeError::MissingHomeworks),
        Some(Value::Array(list)) => Ok(list),
        Some(other) => Err(ShapeError::HomeworksNotAList(json_kind(other))),
    }
}

/// Human-readable name of a JSON value's type.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_payload() {
        let payload = json!({
            "homeworks": [
                {"homework_name": "hw1", "status": "approved"},
                {"homework_name": "hw2", "status": "reviewing"}
            ],
            "current_date": 1700000000
        });
        let records = validate(&payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].str_field("homework_name"), Some("hw1"));
        assert_eq!(records[1].str_field("status"), Some("reviewing"));
    }

    #[test]
    fn test_empty_list_is_valid() {
        let records = validate(&json!({"homeworks": [], "current_date": 1})).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_not_an_object() {
        assert_eq!(validate(&json!([1, 2])), Err(ShapeError::NotAnObject("list")));
        assert_eq!(validate(&json!("oops")), Err(ShapeError::NotAnObject("string")));
        assert_eq!(validate(&Value::Null), Err(ShapeError::NotAnObject("null")));
    }

    #[test]
    fn test_empty_object() {
        assert_eq!(validate(&json!({})), Err(ShapeError::Empty));
    }

    #[test]
    fn test_missing_homeworks_key() {
        let payload = json!({"current_date": 1700000000});
        assert_eq!(validate(&payload), Err(ShapeError::MissingHomeworks));
    }

    #[test]
    fn test_homeworks_not_a_list() {
        let payload = json!({"homeworks": {"homework_name": "hw1"}});
        assert_eq!(validate(&payload), Err(ShapeError::HomeworksNotAList("object")));
    }

    #[test]
    fn test_records_are_not_validated_individually() {
        let records = validate(&json!({"homeworks": [42, {"status": "approved"}]})).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].str_field("homework_name"), None);
    }
}
