//! Status change extraction.
//!
//! A record with a status outside the known set is an error, never a default
//! verdict: it usually means the upstream API changed.

use std::str::FromStr;

use homework_api::{HomeworkRecord, HomeworkStatus};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use super::verdict::verdict;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("homework record has no \"{0}\" field")]
    MissingField(&'static str),

    #[error("unknown homework status: {0}")]
    UnknownStatus(String),
}

/// Build the status change message for `record`.
pub fn extract(record: &HomeworkRecord) -> Result<String, ExtractError> {
    let result = status_message(record);
    if let Err(e) = &result {
        error!(error = %e, "Cannot build status change message");
    }
    result
}

fn status_message(record: &HomeworkRecord) -> Result<String, ExtractError> {
    let name = record
        .name()
        .ok_or(ExtractError::MissingField("homework_name"))?;
    let status = record
        .status()
        .ok_or(ExtractError::MissingField("status"))?;

    let status = status
        .as_str()
        .and_then(|raw| HomeworkStatus::from_str(raw).ok())
        .ok_or_else(|| ExtractError::UnknownStatus(text(status)))?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        text(name),
        verdict(status)
    ))
}

/// Strings without their JSON quotes, anything else as JSON.
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
