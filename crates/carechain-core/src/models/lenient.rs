//! Coercions for loosely typed contract fields.
//!
//! Contract bindings hand back big numbers as strings, flags as `0`/`1`, and
//! sometimes `null` where a value is expected. Missing or malformed numbers
//! become `0`; missing strings become empty.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON value to `u64`. Negative, fractional-overflow and garbage
/// values become `0`.
pub fn coerce_u64(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(float_to_u64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_to_u64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Coerce a JSON value to a finite `f64`, else `0.0`.
pub fn coerce_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

fn float_to_u64(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0 && f <= u64::MAX as f64).then(|| f as u64)
}

pub fn u64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().map(coerce_u64).unwrap_or(0))
}

pub fn u32_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    let n = value.as_ref().map(coerce_u64).unwrap_or(0);
    Ok(u32::try_from(n).unwrap_or(0))
}

pub fn f64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().map(coerce_f64).unwrap_or(0.0))
}

/// Strings, with numbers rendered and `null` mapped to empty.
pub fn string_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Like [`string_or_empty`] but blank strings become `None`.
pub fn optional_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let s = string_or_empty(d)?;
    Ok(if s.trim().is_empty() { None } else { Some(s) })
}

/// Flags arrive as booleans, `0`/`1`, or `"true"`/`"false"`.
pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes"),
        _ => false,
    })
}

/// A list of strings given either as an array or as one comma-separated string.
pub fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect(),
        _ => Vec::new(),
    })
}
