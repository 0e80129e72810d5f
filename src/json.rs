//! Lookups over loosely-shaped JSON shared by the JSON readers and writers.

use crate::Format;
use crate::error::{ParseError, ValueError, WriteError};
use serde::Serialize;
use serde_json::{Map, Value};

/// Parses `content` into the object describing the record.
///
/// A top-level array contributes its first object.
pub(crate) fn parse_object(content: &str, format: Format) -> Result<Map<String, Value>, ParseError> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| ParseError::json(format, e))?;
    first_object(value).ok_or_else(|| {
        ParseError::without_position(
            format,
            ValueError::MalformedJson("expected a JSON object".to_string()),
        )
    })
}

/// The value itself if it is an object, or the first element of an array.
pub(crate) fn first_object(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        Value::Array(items) => items.into_iter().find_map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        }),
        _ => None,
    }
}

/// Non-blank string content of a scalar value.
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => crate::utils::non_blank(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn get_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(text)
}

/// First non-blank string among `keys`.
pub(crate) fn first_text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| get_text(map, key))
}

/// Treats a single value as a one-element list and `null` as empty.
pub(crate) fn as_list(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}

/// Texts of a string-or-list value.
pub(crate) fn texts(value: Option<&Value>) -> Vec<String> {
    as_list(value).into_iter().filter_map(text).collect()
}

/// First text of a string-or-list value, e.g. CSL's `container-title`.
pub(crate) fn first_of(value: Option<&Value>) -> Option<String> {
    as_list(value).into_iter().find_map(text)
}

pub(crate) fn object<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}

/// Pretty-printed JSON with two-space indentation.
pub(crate) fn to_pretty<T: Serialize>(value: &T, format: Format) -> Result<String, WriteError> {
    serde_json::to_string_pretty(value).map_err(|e| WriteError::new(format, e))
}
