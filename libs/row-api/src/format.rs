use std::sync::Arc;

use crate::error::DecodeError;
use crate::schema::Schema;
use crate::value::Row;

/// Runtime deserializer — performs `bytes → Row`.
///
/// - `bytes = None` means "no message" and yields `Ok(None)`; this is
///   distinct from an empty or invalid payload, which is an error.
/// - `topic` is carried for log context only.
///
/// Implementations hold no mutable state: one instance may be shared by
/// any number of threads.
pub trait RowDeserializer: Send + Sync {
    fn deserialize(&self, topic: &str, bytes: Option<&[u8]>) -> Result<Option<Row>, DecodeError>;
}

/// Format plugin — factory. Owns the schema and format config and hands
/// out deserializers bound to them.
pub trait FormatPlugin: Send + Sync {
    fn deserializer(&self) -> Arc<dyn RowDeserializer>;
    fn schema(&self) -> &Schema;
}
