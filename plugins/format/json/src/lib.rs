//! JSON format: schema-directed decoding of JSON object payloads into rows.

mod coerce;
mod config;
mod deserializer;
mod node;
mod resolve;

use std::sync::Arc;

use row_api::{DecodeError, FormatPlugin, RowDeserializer, Schema};

pub use coerce::coerce;
pub use config::{FormatDefinition, JsonFormatConfig, ScalarPolicy};
pub use deserializer::JsonRowDeserializer;
pub use node::JsonNode;
pub use resolve::{lookup, resolve_key};

/// Format plugin for JSON payloads.
pub struct JsonFormat {
    deserializer: Arc<JsonRowDeserializer>,
}

impl JsonFormat {
    pub fn new(schema: Schema, config: JsonFormatConfig) -> Self {
        Self {
            deserializer: Arc::new(JsonRowDeserializer::new(Arc::new(schema), config)),
        }
    }

    pub fn from_definition(def: FormatDefinition) -> Self {
        Self::new(def.schema, def.json)
    }

    /// Build from a TOML definition (`[json]` options + `[[schema.fields]]`).
    pub fn from_toml(toml_str: &str) -> Result<Self, DecodeError> {
        FormatDefinition::parse(toml_str).map(Self::from_definition)
    }
}

impl FormatPlugin for JsonFormat {
    fn deserializer(&self) -> Arc<dyn RowDeserializer> {
        self.deserializer.clone()
    }

    fn schema(&self) -> &Schema {
        self.deserializer.schema()
    }
}
