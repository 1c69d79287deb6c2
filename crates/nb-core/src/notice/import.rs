//! Validation of user-provided import files.
//!
//! Import is all-or-nothing only at the payload level (the file must be
//! a JSON array); individual records are validated independently so one
//! malformed record never aborts the whole batch.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ValidationError;
use crate::notice::{Category, Priority};

/// One record accepted from an import file, before the repository
/// assigns it a fresh id.
///
/// `category` and `priority` are required; a record missing either is
/// rejected. `created_at` is kept when present so imported notices keep
/// their place in the display order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    pub title: String,
    pub content: String,
    pub category: Category,
    pub priority: Priority,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author: Option<String>,
}

impl ImportRecord {
    /// Validate a single raw record. Shape errors and blank required
    /// fields both reject the record.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let record: ImportRecord = serde_json::from_value(value.clone())
            .map_err(|e| ValidationError::MalformedRecord(e.to_string()))?;
        if record.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if record.content.trim().is_empty() {
            return Err(ValidationError::MissingContent);
        }
        Ok(record)
    }
}

/// Parse an import payload into raw records.
///
/// Anything other than a JSON array is an unparseable payload and fails
/// the whole import before any record is considered.
pub fn parse_import_payload(payload: &str) -> Result<Vec<Value>, ValidationError> {
    match serde_json::from_str(payload) {
        Ok(Value::Array(records)) => Ok(records),
        Ok(_) => Err(ValidationError::MalformedPayload(
            "expected a JSON array of notices".to_string(),
        )),
        Err(e) => Err(ValidationError::MalformedPayload(e.to_string())),
    }
}
