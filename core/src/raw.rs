//! Raw records and the declarative field resolver.
//!
//! # Design
//! A raw record is whatever object the backend sent. It is only ever read
//! through [`Field`] rules: an ordered list of candidate keys plus a target
//! type. The first candidate holding a non-null value wins and is coerced to
//! the target type; when nothing matches, or the winning value cannot be
//! coerced, the caller's default applies. Normalization therefore never
//! fails.

use std::marker::PhantomData;

use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

/// Prefix of identifiers invented for records that arrived without one.
pub const SYNTHESIZED_ID_PREFIX: &str = "tmp-";

/// Read-only view over a raw object. Non-objects read as an empty map.
#[derive(Debug, Clone, Copy)]
pub struct Raw<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Raw<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            map: value.as_object(),
        }
    }

    fn empty() -> Self {
        Self { map: None }
    }

    /// The first candidate key whose value is present and not null.
    pub fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        let map = self.map?;
        keys.iter()
            .find_map(|key| map.get(*key).filter(|value| !value.is_null()))
    }

    /// A view over the object under `key`, or an empty view.
    pub fn nested(&self, key: &str) -> Raw<'a> {
        self.nested_any(&[key])
    }

    /// Like [`Raw::nested`] but tries several keys in order.
    pub fn nested_any(&self, keys: &[&str]) -> Raw<'a> {
        self.map
            .and_then(|map| keys.iter().find_map(|key| map.get(*key).filter(|value| value.is_object())))
            .map_or_else(Raw::empty, Raw::new)
    }

    pub fn is_empty(&self) -> bool {
        self.map.map_or(true, Map::is_empty)
    }
}

/// Conversion from an arbitrary JSON value into a field type.
pub trait Coerce: Sized {
    fn coerce(value: &Value) -> Option<Self>;
}

impl Coerce for String {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }
}

impl Coerce for f64 {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

impl Coerce for i64 {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().or_else(|| number.as_f64().map(|n| n.trunc() as i64)),
            Value::String(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().filter(|n| n.is_finite()).map(|n| n.trunc() as i64))
            }
            _ => None,
        }
    }
}

impl Coerce for bool {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(flag) => Some(*flag),
            Value::Number(number) => number.as_f64().map(|n| n != 0.0),
            Value::String(text) => match text.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "ya" | "active" | "aktif" => Some(true),
                "false" | "0" | "no" | "tidak" | "inactive" | "nonaktif" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Coerce for Vec<String> {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(items.iter().filter_map(scalar_text).collect()),
            Value::String(text) if text.trim().is_empty() => Some(Vec::new()),
            Value::String(text) => Some(vec![text.clone()]),
            _ => None,
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(_) | Value::Object(_) | Value::Null => None,
        other => String::coerce(other),
    }
}

/// One canonical field: ordered candidate keys and a target type.
#[derive(Debug)]
pub struct Field<T> {
    keys: &'static [&'static str],
    marker: PhantomData<fn() -> T>,
}

impl<T> Field<T> {
    pub const fn new(keys: &'static [&'static str]) -> Self {
        Self {
            keys,
            marker: PhantomData,
        }
    }

    pub fn keys(&self) -> &'static [&'static str] {
        self.keys
    }
}

impl<T: Coerce> Field<T> {
    /// The coerced winning candidate, if any.
    pub fn get(&self, raw: Raw<'_>) -> Option<T> {
        raw.first(self.keys).and_then(T::coerce)
    }

    pub fn or(&self, raw: Raw<'_>, default: T) -> T {
        self.get(raw).unwrap_or(default)
    }
}

impl<T: Coerce + Default> Field<T> {
    pub fn or_default(&self, raw: Raw<'_>) -> T {
        self.get(raw).unwrap_or_default()
    }
}

impl Field<String> {
    /// Text with a literal placeholder when nothing matches.
    pub fn text_or(&self, raw: Raw<'_>, placeholder: &str) -> String {
        self.get(raw).unwrap_or_else(|| placeholder.to_string())
    }
}

/// Resolves the record's identifier, inventing one when the backend sent
/// none. Invented ids carry [`SYNTHESIZED_ID_PREFIX`] and are logged: they
/// usually mean the backend broke its contract.
pub fn identifier(raw: Raw<'_>, field: &Field<String>, entity: &'static str) -> String {
    match field.get(raw).filter(|id| !id.trim().is_empty()) {
        Some(id) => id,
        None => {
            let id = format!("{SYNTHESIZED_ID_PREFIX}{}", Uuid::new_v4().simple());
            warn!(entity, id = %id, "record arrived without an identifier; synthesized a placeholder");
            id
        }
    }
}

pub fn is_synthesized(id: &str) -> bool {
    id.starts_with(SYNTHESIZED_ID_PREFIX)
}
