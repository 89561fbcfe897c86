//! # Content Model
//!
//! Path-addressable read/write over a block's JSON payload.
//!
//! Reads return `None` for any missing step. Writes create intermediate
//! containers as needed: object members for key segments, `null`-padded
//! arrays for index segments. A non-container value standing where a
//! container is needed is replaced, which matches how the structured form
//! editor and the raw-text editor are expected to commute: both end up
//! producing the same JSON for the same logical field.

use crate::error::ContentResult;
use crate::path::{parse_path, PathSegment};
use serde_json::{Map, Value};

/// Read the value at `path`, if every step exists.
pub fn get<'a>(content: &'a Value, path: &str) -> ContentResult<Option<&'a Value>> {
    let segments = parse_path(path)?;
    let mut current = content;

    for segment in &segments {
        let next = match segment {
            PathSegment::Key(key) => current.as_object().and_then(|map| map.get(key)),
            PathSegment::Index(index) => current.as_array().and_then(|items| items.get(*index)),
        };
        match next {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }

    Ok(Some(current))
}

/// Mutable access to the value at `path`, if every step exists.
pub fn get_mut<'a>(content: &'a mut Value, path: &str) -> ContentResult<Option<&'a mut Value>> {
    let segments = parse_path(path)?;
    let mut current = content;

    for segment in &segments {
        let next = match segment {
            PathSegment::Key(key) => current.as_object_mut().and_then(|map| map.get_mut(key)),
            PathSegment::Index(index) => {
                current.as_array_mut().and_then(|items| items.get_mut(*index))
            }
        };
        match next {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }

    Ok(Some(current))
}

/// Write `value` at `path`, creating intermediate containers as needed.
pub fn set(content: &mut Value, path: &str, value: Value) -> ContentResult<()> {
    let segments = parse_path(path)?;
    let mut current = content;

    for (position, segment) in segments.iter().enumerate() {
        let last = position == segments.len() - 1;

        match segment {
            PathSegment::Key(key) => {
                if !current.is_object() {
                    *current = Value::Object(Map::new());
                }
                let map = current
                    .as_object_mut()
                    .expect("slot was just made an object");
                if last {
                    map.insert(key.clone(), value);
                    return Ok(());
                }
                current = map.entry(key.clone()).or_insert(Value::Null);
            }
            PathSegment::Index(index) => {
                if !current.is_array() {
                    *current = Value::Array(Vec::new());
                }
                let items = current.as_array_mut().expect("slot was just made an array");
                if items.len() <= *index {
                    items.resize(*index + 1, Value::Null);
                }
                if last {
                    items[*index] = value;
                    return Ok(());
                }
                current = &mut items[*index];
            }
        }
    }

    // parse_path guarantees at least one segment, so the loop always
    // returns through one of the `last` arms.
    Ok(())
}
