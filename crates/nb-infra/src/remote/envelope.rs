//! Response-envelope normalization.
//!
//! The hosted JSON services disagree on how they wrap the stored
//! document: JSONBin returns `{"record": [...]}`, others `{"data":
//! [...]}` or the bare array. These are a configuration concern of one
//! parser, not separate code paths.

use nb_core::notice::Notice;
use serde_json::Value;
use tracing::warn;

/// Extract the notice collection from a remote response body.
///
/// Recognized shapes: a bare array, `{"record": [...]}`, `{"data":
/// [...]}`. Unrecognized shapes normalize to an empty collection rather
/// than failing the poll. Individual records that do not parse as
/// notices are dropped with a warning.
pub fn notices_from_envelope(body: Value) -> Vec<Notice> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("record").or_else(|| map.remove("data")) {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Notice>(item) {
            Ok(notice) => Some(notice),
            Err(e) => {
                warn!(error = %e, "dropping malformed notice from remote document");
                None
            }
        })
        .collect()
}
