//! Small shared helpers for argument checking and loose JSON access.

use serde_json::Value;

use crate::error::{CouchError, Result};

/// Rejects empty required arguments before any network call.
pub(crate) fn assert_not_empty(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(CouchError::InvalidArgument(format!(
            "{} may not be empty",
            what
        )));
    }
    Ok(())
}

/// A top-level JSON field as a string, or `None` if absent or not a string.
pub fn get_as_string(json: &Value, key: &str) -> Option<String> {
    json.get(key).and_then(Value::as_str).map(str::to_string)
}

/// A top-level JSON field as an integer, or `0` if absent.
pub fn get_as_long(json: &Value, key: &str) -> i64 {
    json.get(key).and_then(Value::as_i64).unwrap_or(0)
}

/// A file name with its last extension stripped (`map.js` → `map`).
pub fn remove_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}
