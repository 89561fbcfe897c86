//! # Boundary Codec
//!
//! Content crosses the persistence boundary as a serialized JSON string
//! (`contentJson`), while everything in-process manipulates a structured
//! value. Serialization must round-trip without loss, including object key
//! order (the workspace enables `serde_json`'s `preserve_order`).
//!
//! Re-parsing failures never abort the surrounding operation: the content
//! degrades to an empty object and a warning is logged.

use serde_json::{Map, Value};
use tracing::warn;

/// Serialize content for the persistence boundary.
pub fn to_boundary_json(content: &Value) -> String {
    serde_json::to_string(content).unwrap_or_else(|err| {
        // Value-to-string serialization only fails on pathological inputs
        // (e.g. non-string map keys, which Value cannot hold).
        warn!(error = %err, "content serialization failed, sending empty object");
        "{}".to_string()
    })
}

/// Parse content arriving from the persistence boundary.
///
/// Malformed payloads degrade to `{}` rather than failing the operation
/// that carried them.
pub fn from_boundary_json(raw: &str) -> Value {
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "malformed content JSON from store, using empty object");
            Value::Object(Map::new())
        }
    }
}
