use std::collections::BTreeMap;

use row_api::{CoerceError, FieldType, Value};
use serde_json::Value as JsonValue;

use crate::config::ScalarPolicy;
use crate::node::{numeric, parse_boolean, parse_numeric, JsonNode, Numeric};

/// Convert one JSON node to its declared type.
///
/// Scalars follow `policy`; containers are always strict: an `array` column
/// needs a JSON array and a `map` column a JSON object. Recursion depth is
/// the nesting depth of the declared type.
pub fn coerce(field_type: &FieldType, node: &JsonValue, policy: ScalarPolicy) -> Result<Value, CoerceError> {
    match field_type {
        FieldType::Boolean => match policy {
            ScalarPolicy::Lenient => Ok(Value::Bool(node.as_boolean())),
            ScalarPolicy::Strict => strict_boolean(field_type, node).map(Value::Bool),
        },
        FieldType::Int32 => match policy {
            ScalarPolicy::Lenient => Ok(Value::Int32(node.as_int32())),
            ScalarPolicy::Strict => strict_numeric(field_type, node).map(|n| Value::Int32(n.to_i32())),
        },
        FieldType::Int64 => match policy {
            ScalarPolicy::Lenient => Ok(Value::Int64(node.as_int64())),
            ScalarPolicy::Strict => strict_numeric(field_type, node).map(|n| Value::Int64(n.to_i64())),
        },
        FieldType::Float64 => match policy {
            ScalarPolicy::Lenient => Ok(Value::Float64(node.as_float64())),
            ScalarPolicy::Strict => strict_numeric(field_type, node).map(|n| Value::Float64(n.to_f64())),
        },
        FieldType::String => Ok(Value::String(node.as_text())),
        FieldType::Array(element) => match node {
            JsonValue::Array(items) => items
                .iter()
                .map(|item| coerce(element, item, policy))
                .collect::<Result<Vec<_>, CoerceError>>()
                .map(Value::Array),
            other => Err(mismatch(field_type, other)),
        },
        FieldType::Map(value_type) => match node {
            JsonValue::Object(entries) => entries
                .iter()
                .map(|(key, value)| Ok((key.clone(), coerce(value_type, value, policy)?)))
                .collect::<Result<BTreeMap<_, _>, CoerceError>>()
                .map(Value::Map),
            other => Err(mismatch(field_type, other)),
        },
        FieldType::Int8 | FieldType::Int16 | FieldType::Float32 | FieldType::Bytes | FieldType::Struct(_) => {
            Err(CoerceError::UnsupportedType(field_type.clone()))
        }
    }
}

fn mismatch(expected: &FieldType, found: &JsonValue) -> CoerceError {
    CoerceError::TypeMismatch {
        expected: expected.clone(),
        found: found.kind_name(),
    }
}

fn strict_numeric(expected: &FieldType, node: &JsonValue) -> Result<Numeric, CoerceError> {
    match node {
        JsonValue::String(text) => parse_numeric(text)
            .and_then(|n| match expected {
                FieldType::Float64 => Some(n),
                _ => n.integral(),
            })
            .ok_or_else(|| CoerceError::InvalidScalar {
                expected: expected.clone(),
                text: text.clone(),
            }),
        other => numeric(other).ok_or_else(|| mismatch(expected, other)),
    }
}

fn strict_boolean(expected: &FieldType, node: &JsonValue) -> Result<bool, CoerceError> {
    match node {
        JsonValue::Bool(b) => Ok(*b),
        JsonValue::Number(_) => Ok(node.as_boolean()),
        JsonValue::String(text) => parse_boolean(text).ok_or_else(|| CoerceError::InvalidScalar {
            expected: expected.clone(),
            text: text.clone(),
        }),
        other => Err(mismatch(expected, other)),
    }
}
