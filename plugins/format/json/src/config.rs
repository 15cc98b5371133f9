use row_api::{DecodeError, Schema};
use serde::{Deserialize, Serialize};

/// How scalar columns treat values that are not of their declared kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarPolicy {
    /// Best-effort conversion; unreadable values become `false` / `0` / `0.0`.
    #[default]
    Lenient,
    /// Text must parse as the declared type; null and containers are rejected.
    Strict,
}

/// JSON format options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonFormatConfig {
    pub scalars: ScalarPolicy,
}

/// Schema plus format options, as written in a TOML config.
///
/// ```toml
/// [json]
/// scalars = "strict"
///
/// [[schema.fields]]
/// name = "ORDERS.ID"
/// type = "int64"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct FormatDefinition {
    pub schema: Schema,
    #[serde(default)]
    pub json: JsonFormatConfig,
}

impl FormatDefinition {
    /// Parse a definition from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, DecodeError> {
        toml::from_str(toml_str).map_err(|e| DecodeError::config(e.to_string()))
    }
}
