//! Decoded API payloads and their shape check.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::ShapeError;
use crate::models::HomeworkRecord;

/// A decoded but not yet trusted API response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawResponse(Value);

/// What the response says about `current_date`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurrentDate<'a> {
    /// Key missing or `null`.
    Absent,
    Timestamp(i64),
    /// Present, but not an integer.
    Invalid(&'a Value),
}

impl RawResponse {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Server-side timestamp to use as the next `from_date`.
    pub fn current_date(&self) -> CurrentDate<'_> {
        match self.0.get("current_date") {
            None | Some(Value::Null) => CurrentDate::Absent,
            Some(value) => match value.as_i64() {
                Some(ts) => CurrentDate::Timestamp(ts),
                None => CurrentDate::Invalid(value),
            },
        }
    }
}

/// Check the response shape and return its homework records in source order.
///
/// A missing `homeworks` key and a `homeworks` value that is not a list are
/// both errors; neither is coerced into an empty list. The elements
/// themselves are returned as received.
pub fn validate(response: &RawResponse) -> Result<Vec<HomeworkRecord>, ShapeError> {
    debug!("Validating API response");

    let result = homeworks(response.as_value());
    if let Err(e) = &result {
        error!(error = %e, "API response failed validation");
    }
    result
}

fn homeworks(value: &Value) -> Result<Vec<HomeworkRecord>, ShapeError> {
    let object = value.as_object().ok_or(ShapeError::NotAMapping {
        found: json_type_name(value),
    })?;

    let homeworks = object
        .get("homeworks")
        .ok_or(ShapeError::MissingHomeworks)?;

    let items = homeworks.as_array().ok_or(ShapeError::NotASequence {
        found: json_type_name(homeworks),
    })?;

    Ok(items.iter().cloned().map(HomeworkRecord::from_value).collect())
}

fn json_type_name(value: &Value) -> &'static str {
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

    fn raw(value: Value) -> RawResponse {
        RawResponse::new(value)
    }

    #[test]
    fn test_validate_returns_records_in_order() {
        let response = raw(json!({
            "homeworks": [
                {"homework_name": "hw2", "status": "reviewing"},
                {"homework_name": "hw1", "status": "approved"},
            ],
            "current_date": 1000,
        }));

        let records = validate(&response).unwrap();
        assert_eq!(
            records,
            vec![
                HomeworkRecord::new("hw2", "reviewing"),
                HomeworkRecord::new("hw1", "approved"),
            ]
        );
    }

    #[test]
    fn test_validate_empty_list() {
        let records = validate(&raw(json!({"homeworks": []}))).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_validate_missing_key() {
        let err = validate(&raw(json!({"current_date": 1000}))).unwrap_err();
        assert_eq!(err, ShapeError::MissingHomeworks);
    }

    #[test]
    fn test_validate_not_a_list() {
        let err = validate(&raw(json!({"homeworks": null}))).unwrap_err();
        assert_eq!(err, ShapeError::NotASequence { found: "null" });

        let err = validate(&raw(json!({
            "homeworks": {"homework_name": "hw1", "status": "approved"}
        })))
        .unwrap_err();
        assert_eq!(err, ShapeError::NotASequence { found: "object" });
    }

    #[test]
    fn test_validate_not_an_object() {
        let err = validate(&raw(json!([{"homework_name": "hw1"}]))).unwrap_err();
        assert_eq!(err, ShapeError::NotAMapping { found: "list" });
    }

    #[test]
    fn test_validate_returns_elements_unchanged() {
        let response = raw(json!({
            "homeworks": [
                {"homework_name": "hw1", "status": "approved"},
                {"homework_name": "hw0", "status": 3},
                "hw-1",
                {"status": "approved"},
            ]
        }));

        let records = validate(&response).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0], HomeworkRecord::new("hw1", "approved"));
        assert_eq!(records[1].status(), Some(&json!(3)));
        assert_eq!(records[2].as_value(), &json!("hw-1"));
        assert_eq!(records[3].name(), None);
    }

    #[test]
    fn test_current_date() {
        assert_eq!(
            raw(json!({"current_date": 1000})).current_date(),
            CurrentDate::Timestamp(1000)
        );
        assert_eq!(raw(json!({"homeworks": []})).current_date(), CurrentDate::Absent);
        assert_eq!(raw(json!({"current_date": null})).current_date(), CurrentDate::Absent);

        let response = raw(json!({"current_date": "yesterday"}));
        assert!(matches!(response.current_date(), CurrentDate::Invalid(_)));
    }
}
