use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════
//  Field Type
// ════════════════════════════════════════════════════════════════

/// Declared type of a schema field.
///
/// Scalars plus two recursive containers. Map keys are always strings,
/// only the value type is declared.
///
/// The set is wider than what every format can decode: a format reports
/// `UnsupportedType` for the variants it does not implement, so a schema
/// written for another backend fails loudly instead of producing garbage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Bytes,
    Array(Box<FieldType>),
    Map(Box<FieldType>),
    Struct(Vec<Field>),
}

impl FieldType {
    /// Shortcut: `array<element>`.
    pub fn array(element: FieldType) -> Self {
        FieldType::Array(Box::new(element))
    }

    /// Shortcut: `map<string, value>`.
    pub fn map(value: FieldType) -> Self {
        FieldType::Map(Box::new(value))
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Int8 => write!(f, "int8"),
            FieldType::Int16 => write!(f, "int16"),
            FieldType::Int32 => write!(f, "int32"),
            FieldType::Int64 => write!(f, "int64"),
            FieldType::Float32 => write!(f, "float32"),
            FieldType::Float64 => write!(f, "float64"),
            FieldType::String => write!(f, "string"),
            FieldType::Bytes => write!(f, "bytes"),
            FieldType::Array(element) => write!(f, "array<{element}>"),
            FieldType::Map(value) => write!(f, "map<string, {value}>"),
            FieldType::Struct(fields) => {
                write!(f, "struct<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.field_type)?;
                }
                write!(f, ">")
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════
//  Field & Schema
// ════════════════════════════════════════════════════════════════

/// A single named, typed column.
///
/// `name` may be qualified by a stream/table prefix (`"ORDERS.ID"`).
/// Formats decide how much of the name is matched against the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Ordered column declaration.
///
/// Field position in `fields` determines its index in `Row` after
/// `deserialize()`. Immutable once handed to a deserializer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested() {
        let ty = FieldType::map(FieldType::array(FieldType::Int64));
        assert_eq!(ty.to_string(), "map<string, array<int64>>");

        let ty = FieldType::Struct(vec![
            Field::new("a", FieldType::Int32),
            Field::new("b", FieldType::String),
        ]);
        assert_eq!(ty.to_string(), "struct<a: int32, b: string>");
    }

    #[test]
    fn test_schema_from_toml() {
        let schema: Schema = toml::from_str(
            r#"
            [[fields]]
            name = "ORDERS.ID"
            type = "int64"

            [[fields]]
            name = "ORDERS.ITEMS"
            type = { array = "string" }

            [[fields]]
            name = "ORDERS.TAGS"
            type = { map = { array = "float64" } }
            "#,
        )
        .unwrap();

        assert_eq!(schema.len(), 3);
        assert_eq!(schema.fields[0], Field::new("ORDERS.ID", FieldType::Int64));
        assert_eq!(schema.fields[1].field_type, FieldType::array(FieldType::String));
        assert_eq!(
            schema.fields[2].field_type,
            FieldType::map(FieldType::array(FieldType::Float64))
        );
        assert_eq!(
            schema.field_names().collect::<Vec<_>>(),
            ["ORDERS.ID", "ORDERS.ITEMS", "ORDERS.TAGS"]
        );
    }

    #[test]
    fn test_schema_from_json() {
        let schema: Schema = serde_json::from_value(serde_json::json!({
            "fields": [
                { "name": "point", "type": { "struct": [
                    { "name": "x", "type": "float64" },
                    { "name": "y", "type": "float64" }
                ] } }
            ]
        }))
        .unwrap();

        assert_eq!(
            schema.fields[0].field_type,
            FieldType::Struct(vec![
                Field::new("x", FieldType::Float64),
                Field::new("y", FieldType::Float64),
            ])
        );
    }
}
