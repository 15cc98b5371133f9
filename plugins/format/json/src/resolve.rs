//! Schema field name → payload key.
//!
//! Schema names are often qualified by a stream or table (`"ORDERS.ID"`)
//! while the payload only carries the bare column (`"id"`), in whatever
//! letter case the producer chose.

use serde_json::{Map, Value as JsonValue};

/// Lookup key for a schema field: the part after the first `.`, lowercased.
pub fn resolve_key(field_name: &str) -> String {
    let column = field_name
        .split_once('.')
        .map_or(field_name, |(_, column)| column);
    column.to_lowercase()
}

/// Case-insensitive key lookup.
///
/// An exact match wins; otherwise the first key equal under case folding,
/// in the object's iteration order.
pub fn lookup<'a>(object: &'a Map<String, JsonValue>, key: &str) -> Option<&'a JsonValue> {
    if let Some(value) = object.get(key) {
        return Some(value);
    }
    object
        .iter()
        .find(|(candidate, _)| eq_ignore_case(candidate, key))
        .map(|(_, value)| value)
}

/// Per-char upper-then-lower fold, so `Σ`, `σ` and the word-final `ς` all
/// compare equal regardless of where `str::to_lowercase` put them.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    fold(a).eq(fold(b))
}

fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars()
        .flat_map(char::to_uppercase)
        .flat_map(char::to_lowercase)
}
