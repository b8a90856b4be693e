//! Normalization of API payloads into canonical records
//!
//! The ticketing API serializes the same field as `fieldName` or `FieldName`
//! depending on the endpoint, sends numbers as strings now and then, and may
//! wrap payloads in a `{ "data": ... }` envelope. Every entity is mapped from
//! raw JSON exactly once, here, right after it is fetched.

use serde_json::{Map, Value};
use crate::utils::errors::{ApiError, Result};

/// Conversion from a raw API JSON object into a canonical record
pub trait FromApi: Sized {
    /// Entity name used in error messages
    const ENTITY: &'static str;

    fn from_api(value: &Value) -> Result<Self>;
}

/// Strip a `{ "data": ... }` envelope if present
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            let key = ["data", "Data"].into_iter().find(|k| map.contains_key(*k));
            match key {
                Some(key) => map.remove(key).unwrap_or(Value::Null),
                None => Value::Object(map),
            }
        }
        other => other,
    }
}

/// Map a JSON array into records. A non-array payload yields an empty list;
/// an element that fails to map is an error.
pub fn list_from_api<T: FromApi>(value: &Value) -> Result<Vec<T>> {
    match value {
        Value::Array(items) => items.iter().map(T::from_api).collect(),
        _ => Ok(Vec::new()),
    }
}

/// Upper-case the first character: `eventBookingId` -> `EventBookingId`
pub fn pascal_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Case-tolerant view over one JSON object
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
    entity: &'static str,
}

impl<'a> Fields<'a> {
    pub fn new(value: &'a Value, entity: &'static str) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            ApiError::InvalidResponse(format!("expected {} object, got {}", entity, kind_of(value)))
        })?;
        Ok(Self { map, entity })
    }

    /// First non-null value among `keys`, each tried as given and in PascalCase
    pub fn lookup(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|key| {
            self.map
                .get(*key)
                .filter(|v| !v.is_null())
                .or_else(|| self.map.get(&pascal_case(key)).filter(|v| !v.is_null()))
        })
    }

    pub fn string(&self, keys: &[&str]) -> Option<String> {
        match self.lookup(keys)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn string_or_default(&self, keys: &[&str]) -> String {
        self.string(keys).unwrap_or_default()
    }

    /// Non-empty string, treating `""` the same as absent
    pub fn non_empty(&self, keys: &[&str]) -> Option<String> {
        self.string(keys).filter(|s| !s.trim().is_empty())
    }

    pub fn i64(&self, keys: &[&str]) -> Option<i64> {
        match self.lookup(keys)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn f64(&self, keys: &[&str]) -> Option<f64> {
        match self.lookup(keys)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn bool(&self, keys: &[&str]) -> Option<bool> {
        match self.lookup(keys)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Value::Number(n) => n.as_i64().map(|n| n != 0),
            _ => None,
        }
    }

    /// Identifier that must be present for the record to be usable
    pub fn required_id(&self, keys: &[&str]) -> Result<i64> {
        self.i64(keys).ok_or_else(|| {
            ApiError::InvalidResponse(format!("{} record is missing its id ({})", self.entity, keys.join("/"))).into()
        })
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
