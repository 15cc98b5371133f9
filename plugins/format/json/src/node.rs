use serde_json::{Number, Value as JsonValue};

/// Best-effort scalar reads over a parsed JSON node.
///
/// Every method is total: whatever scalar kind is present gets converted,
/// and anything that cannot be read falls back to the zero value
/// (`false`, `0`, `0.0`). Producers that send `"42"` for a numeric column
/// or `1` for a flag are tolerated.
pub trait JsonNode {
    /// `true` for `true`, non-zero numbers and the text `"true"`.
    fn as_boolean(&self) -> bool;
    /// Integral sources are truncated to the low 32 bits, floats saturate.
    fn as_int32(&self) -> i32;
    fn as_int64(&self) -> i64;
    fn as_float64(&self) -> f64;
    /// Strings as-is, everything else as compact JSON text.
    fn as_text(&self) -> String;
    /// JSON kind, for error messages.
    fn kind_name(&self) -> &'static str;
}

/// Number read from a node before narrowing to the target width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    pub(crate) fn to_i32(self) -> i32 {
        match self {
            Numeric::Int(v) => v as i32,
            Numeric::Float(f) => f as i32,
        }
    }

    pub(crate) fn to_i64(self) -> i64 {
        match self {
            Numeric::Int(v) => v,
            Numeric::Float(f) => f as i64,
        }
    }

    pub(crate) fn to_f64(self) -> f64 {
        match self {
            Numeric::Int(v) => v as f64,
            Numeric::Float(f) => f,
        }
    }

    /// `None` for NaN and infinities, which have no integer reading.
    pub(crate) fn integral(self) -> Option<Numeric> {
        match self {
            Numeric::Float(f) if !f.is_finite() => None,
            other => Some(other),
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Numeric::Int(v) => v == 0,
            Numeric::Float(f) => f == 0.0,
        }
    }
}

fn number_numeric(n: &Number) -> Numeric {
    match n.as_i64() {
        Some(v) => Numeric::Int(v),
        // u64 above i64::MAX goes through f64 so narrowing saturates.
        None => Numeric::Float(n.as_f64().unwrap_or(0.0)),
    }
}

/// Integer first, then float. Surrounding whitespace is ignored.
pub(crate) fn parse_numeric(text: &str) -> Option<Numeric> {
    let text = text.trim();
    match text.parse::<i64>() {
        Ok(v) => Some(Numeric::Int(v)),
        Err(_) => text.parse::<f64>().ok().map(Numeric::Float),
    }
}

pub(crate) fn parse_boolean(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Numeric view of booleans, numbers and numeric text. `None` otherwise.
pub(crate) fn numeric(node: &JsonValue) -> Option<Numeric> {
    match node {
        JsonValue::Bool(b) => Some(Numeric::Int(i64::from(*b))),
        JsonValue::Number(n) => Some(number_numeric(n)),
        JsonValue::String(s) => parse_numeric(s),
        _ => None,
    }
}

impl JsonNode for JsonValue {
    fn as_boolean(&self) -> bool {
        match self {
            JsonValue::Bool(b) => *b,
            JsonValue::Number(n) => !number_numeric(n).is_zero(),
            JsonValue::String(s) => parse_boolean(s).unwrap_or(false),
            _ => false,
        }
    }

    fn as_int32(&self) -> i32 {
        numeric(self).and_then(Numeric::integral).map_or(0, Numeric::to_i32)
    }

    fn as_int64(&self) -> i64 {
        numeric(self).and_then(Numeric::integral).map_or(0, Numeric::to_i64)
    }

    fn as_float64(&self) -> f64 {
        numeric(self).map_or(0.0, Numeric::to_f64)
    }

    fn as_text(&self) -> String {
        match self {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }
}
