//! Conversion between runtime values and JSON.
//!
//! Arrays become auto-keyed maps and objects keep their document order
//! with normalized keys. On the way out, a map whose keys are exactly
//! `0..len` becomes an array and anything else becomes an object.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{Key, OrderedMap, Value, ValueError};

/// Parse any JSON value.
pub fn value_from_json(v: &serde_json::Value) -> Result<Value, ValueError> {
    match v {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Value::Int(i));
            }
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map(Value::Decimal)
                .map_err(|_| ValueError::InvalidNumber(text))
        }
        serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            map_from_json(v).map(Value::Map)
        }
    }
}

/// Parse a JSON array or object into a map.
pub fn map_from_json(v: &serde_json::Value) -> Result<OrderedMap, ValueError> {
    match v {
        serde_json::Value::Array(items) => {
            let mut map = OrderedMap::with_capacity(items.len());
            for item in items {
                map.push(value_from_json(item)?);
            }
            Ok(map)
        }
        serde_json::Value::Object(fields) => {
            let mut map = OrderedMap::with_capacity(fields.len());
            for (k, item) in fields {
                map.insert(Key::normalize(k), value_from_json(item)?);
            }
            Ok(map)
        }
        other => Err(ValueError::NotACollection {
            found: json_kind(other).to_string(),
        }),
    }
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Convert a runtime value to JSON for output.
///
/// Decimals are written as strings so no precision is lost.
pub fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::json!(b),
        Value::Int(i) => serde_json::json!(i),
        Value::Decimal(d) => serde_json::json!(d.to_string()),
        Value::Text(s) => serde_json::json!(s),
        Value::Map(m) => map_to_json(m),
        Value::Ref(cell) => value_to_json(&cell.get()),
    }
}

pub fn map_to_json(m: &OrderedMap) -> serde_json::Value {
    if m.is_list() {
        serde_json::Value::Array(m.values().map(value_to_json).collect())
    } else {
        let mut fields = serde_json::Map::with_capacity(m.len());
        for (k, v) in m {
            fields.insert(k.to_string(), value_to_json(v));
        }
        serde_json::Value::Object(fields)
    }
}
