use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Review status reported for a homework.
///
/// Only these three values are known. Anything else the API sends is kept
/// as a raw value on [`HomeworkRecord::status`] so callers can report it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [Self; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }
}

/// One element of the `homeworks` list, kept exactly as the API sent it.
///
/// Nothing about the element is checked on arrival. Whether `homework_name`
/// and `status` are present and usable is decided when the record is turned
/// into a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HomeworkRecord(Value);

impl HomeworkRecord {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self(json!({
            "homework_name": name.into(),
            "status": status.into(),
        }))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// `homework_name`, or `None` when missing or `null`.
    pub fn name(&self) -> Option<&Value> {
        self.field("homework_name")
    }

    /// `status`, or `None` when missing or `null`.
    pub fn status(&self) -> Option<&Value> {
        self.field("status")
    }

    fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }
}

/// Query string of a status request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusQuery {
    pub from_date: i64,
}
