pub mod error;
pub mod format;
pub mod schema;
pub mod value;

pub use error::{CoerceError, DecodeError, ErrorKind};
pub use format::{FormatPlugin, RowDeserializer};
pub use schema::{Field, FieldType, Schema};
pub use value::{Row, Value};
