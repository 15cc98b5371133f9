use std::sync::Arc;

use row_api::{DecodeError, RowDeserializer, Row, Schema, Value};
use serde_json::Value as JsonValue;

use crate::coerce::coerce;
use crate::config::JsonFormatConfig;
use crate::node::JsonNode;
use crate::resolve::{lookup, resolve_key};

/// JSON object → `Row`, driven by a fixed schema.
///
/// Lookup keys are resolved once at construction and never change, so a
/// single instance can serve concurrent callers without synchronization.
pub struct JsonRowDeserializer {
    schema: Arc<Schema>,
    /// `keys[i]` is the payload key of `schema.fields[i]`.
    keys: Vec<String>,
    config: JsonFormatConfig,
}

impl JsonRowDeserializer {
    pub fn new(schema: Arc<Schema>, config: JsonFormatConfig) -> Self {
        let keys = schema.fields.iter().map(|f| resolve_key(&f.name)).collect();
        tracing::debug!(fields = schema.len(), scalars = ?config.scalars, "json row deserializer created");
        Self { schema, keys, config }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Decode one payload. The top level must be a JSON object.
    ///
    /// Columns without a matching key are `Value::Null`. The first field that
    /// fails to coerce fails the whole row.
    pub fn deserialize_row(&self, bytes: &[u8]) -> Result<Row, DecodeError> {
        let object = match serde_json::from_slice::<JsonValue>(bytes)? {
            JsonValue::Object(object) => object,
            other => {
                return Err(DecodeError::malformed(format!(
                    "top-level JSON {} is not an object",
                    other.kind_name()
                )));
            }
        };

        let mut values = Vec::with_capacity(self.schema.len());
        for (field, key) in self.schema.fields.iter().zip(&self.keys) {
            let Some(node) = lookup(&object, key) else {
                tracing::debug!(field = %field.name, key = %key, "field absent from payload");
                values.push(Value::Null);
                continue;
            };
            let value = coerce(&field.field_type, node, self.config.scalars).map_err(|source| {
                DecodeError::Coercion {
                    field: field.name.clone(),
                    field_type: field.field_type.clone(),
                    source,
                }
            })?;
            values.push(value);
        }

        Ok(Row::new(values))
    }
}

impl RowDeserializer for JsonRowDeserializer {
    fn deserialize(&self, topic: &str, bytes: Option<&[u8]>) -> Result<Option<Row>, DecodeError> {
        let Some(bytes) = bytes else {
            return Ok(None);
        };
        let row = self.deserialize_row(bytes)?;
        tracing::trace!(topic = %topic, fields = row.len(), "decoded row");
        Ok(Some(row))
    }
}

#[cfg(test)]
mod tests {
    use row_api::{CoerceError, Field, FieldType};

    use super::*;
    use crate::config::ScalarPolicy;

    fn deserializer(fields: Vec<Field>) -> JsonRowDeserializer {
        JsonRowDeserializer::new(Arc::new(Schema::new(fields)), JsonFormatConfig::default())
    }

    #[test]
    fn test_none_is_absent_row() {
        let de = deserializer(vec![Field::new("T.A", FieldType::Int64)]);
        assert!(de.deserialize("t", None).unwrap().is_none());
    }

    #[test]
    fn test_empty_bytes_are_malformed() {
        let de = deserializer(vec![Field::new("T.A", FieldType::Int64)]);
        let err = de.deserialize("t", Some(b"")).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPayload(_)));
    }

    #[test]
    fn test_top_level_must_be_object() {
        let de = deserializer(vec![]);
        let payloads: [&[u8]; 4] = [b"[1,2]", b"42", b"\"x\"", b"null"];
        for payload in payloads {
            let err = de.deserialize_row(payload).unwrap_err();
            assert!(matches!(err, DecodeError::MalformedPayload(_)), "{err}");
        }
    }

    #[test]
    fn test_missing_key_is_null() {
        let de = deserializer(vec![
            Field::new("T.A", FieldType::Int64),
            Field::new("T.B", FieldType::String),
        ]);
        let row = de.deserialize_row(br#"{"b": "x"}"#).unwrap();
        assert_eq!(row, Row::new(vec![Value::Null, Value::from("x")]));
    }

    #[test]
    fn test_json_null_is_coerced_not_absent() {
        let de = deserializer(vec![Field::new("T.A", FieldType::Int64)]);
        let row = de.deserialize_row(br#"{"a": null}"#).unwrap();
        assert_eq!(row.get(0), Some(&Value::Int64(0)));
    }

    #[test]
    fn test_coercion_error_names_field() {
        let de = deserializer(vec![
            Field::new("T.OK", FieldType::Int64),
            Field::new("T.ITEMS", FieldType::array(FieldType::String)),
        ]);
        let err = de.deserialize_row(br#"{"ok": 1, "items": {"a": 1}}"#).unwrap_err();
        match err {
            DecodeError::Coercion { field, field_type, source } => {
                assert_eq!(field, "T.ITEMS");
                assert_eq!(field_type, FieldType::array(FieldType::String));
                assert!(matches!(source, CoerceError::TypeMismatch { found: "object", .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_policy_flows_through() {
        let de = JsonRowDeserializer::new(
            Arc::new(Schema::new(vec![Field::new("T.N", FieldType::Int32)])),
            JsonFormatConfig { scalars: ScalarPolicy::Strict },
        );
        assert_eq!(de.deserialize_row(br#"{"n": "7"}"#).unwrap().get(0), Some(&Value::Int32(7)));
        assert!(de.deserialize_row(br#"{"n": "seven"}"#).is_err());
    }
}
