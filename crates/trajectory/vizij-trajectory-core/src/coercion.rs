//! Coercion helpers for raw trajectory document fields.
//!
//! Generators have emitted numbers both as JSON numbers and as numeric
//! strings (`"0.2794"`), so every numeric read goes through these helpers.

use serde_json::{Map, Value as JsonValue};

/// Coerce a JSON value into an `f64`.
/// Rules:
/// - Number -> its value
/// - String -> parsed after trimming, if it is a valid finite float
/// - anything else -> None
pub fn to_f64(v: &JsonValue) -> Option<f64> {
    match v {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Coerce a JSON value into a non-negative integer.
/// Floats are accepted only when they carry no fractional part.
pub fn to_u64(v: &JsonValue) -> Option<u64> {
    match v {
        JsonValue::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        JsonValue::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// Read `key` from an object and coerce it to `f64`.
#[inline]
pub fn field_f64(obj: &Map<String, JsonValue>, key: &str) -> Option<f64> {
    obj.get(key).and_then(to_f64)
}

/// Read a numeric vector: a JSON array of numbers, or a single number which
/// becomes a one-element vector. Any non-numeric element rejects the whole
/// value.
pub fn to_f64_vec(v: &JsonValue) -> Option<Vec<f64>> {
    match v {
        JsonValue::Array(items) => items.iter().map(to_f64).collect(),
        other => to_f64(other).map(|f| vec![f]),
    }
}
