//! Response envelope stripping and record-list resolution.
//!
//! The backend answers with a bare entity, `{data: entity}`,
//! `{data: {results: [...]}}`, `{data: [...]}` or a bare array. [`unwrap`]
//! removes one `data` layer; [`records`] then finds the list for list
//! endpoints. Neither fails: an unrecognized list shape reads as empty, so
//! zero records and an unknown shape look the same to callers.

use serde_json::Value;

/// Returns the `data` property if the payload has one, otherwise the payload
/// itself. Applied exactly once per response.
pub fn unwrap(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or(Value::Null),
        other => other,
    }
}

/// Extracts the record array from an unwrapped payload, checking `results`,
/// then a nested `data` array, then the payload itself.
pub fn records(payload: &Value) -> &[Value] {
    if let Some(results) = payload.get("results").and_then(Value::as_array) {
        return results.as_slice();
    }
    if let Some(data) = payload.get("data").and_then(Value::as_array) {
        return data.as_slice();
    }
    match payload {
        Value::Array(items) => items.as_slice(),
        _ => &[],
    }
}
