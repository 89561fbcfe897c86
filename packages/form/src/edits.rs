//! # Edit Operations
//!
//! Write-back operations behind the rendered widgets. Every operation goes
//! through the content model, so form edits and raw-text edits of the same
//! logical field produce identical JSON.

use crate::error::{FormError, FormResult};
use pagecraft_content as content;
use pagecraft_schema::{FieldKind, FieldSpec};
use serde_json::{json, Map, Value};

/// Direction for [`move_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Commit a scalar input. Numeric fields coerce the text back to a number;
/// text that is not a number is rejected and the stored value is untouched.
pub fn set_scalar(target: &mut Value, path: &str, raw: &str, numeric: bool) -> FormResult<()> {
    let value = if numeric {
        parse_number(raw)?
    } else {
        Value::String(raw.to_string())
    };
    content::set(target, path, value)?;
    Ok(())
}

/// Commit a select choice, validating it against the declared options.
pub fn set_select(target: &mut Value, path: &str, choice: &str, options: &[String]) -> FormResult<()> {
    if !options.is_empty() && !options.iter().any(|option| option == choice) {
        return Err(FormError::InvalidOption(choice.to_string()));
    }
    content::set(target, path, Value::String(choice.to_string()))?;
    Ok(())
}

/// Append a new element to the list at `path`, shaped by the item schema.
/// A missing list is created.
pub fn append_item(target: &mut Value, path: &str, item_spec: &FieldSpec) -> FormResult<()> {
    let length = match content::get(target, path)? {
        Some(Value::Array(items)) => items.len(),
        Some(Value::Null) | None => 0,
        Some(_) => return Err(FormError::NotAList(path.to_string())),
    };
    content::set(target, &format!("{path}[{length}]"), default_value(item_spec))?;
    Ok(())
}

/// Remove the element at `index` from the list at `path`.
pub fn remove_item(target: &mut Value, path: &str, index: usize) -> FormResult<()> {
    let items = list_at(target, path)?;
    if index >= items.len() {
        return Err(FormError::IndexOutOfBounds {
            index,
            len: items.len(),
        });
    }
    items.remove(index);
    Ok(())
}

/// Swap the element at `index` with its neighbor in `direction`. Moving
/// past either end is a no-op.
pub fn move_item(
    target: &mut Value,
    path: &str,
    index: usize,
    direction: MoveDirection,
) -> FormResult<()> {
    let items = list_at(target, path)?;
    if index >= items.len() {
        return Err(FormError::IndexOutOfBounds {
            index,
            len: items.len(),
        });
    }
    let neighbor = match direction {
        MoveDirection::Up if index > 0 => index - 1,
        MoveDirection::Down if index + 1 < items.len() => index + 1,
        _ => return Ok(()),
    };
    items.swap(index, neighbor);
    Ok(())
}

/// Append a tag to the string list at `path`, preserving order. A missing
/// list is created.
pub fn append_tag(target: &mut Value, path: &str, tag: &str) -> FormResult<()> {
    let length = match content::get(target, path)? {
        Some(Value::Array(items)) => items.len(),
        Some(Value::Null) | None => 0,
        Some(_) => return Err(FormError::NotAList(path.to_string())),
    };
    content::set(target, &format!("{path}[{length}]"), json!(tag))?;
    Ok(())
}

/// Remove the tag at `index` from the string list at `path`.
pub fn remove_tag(target: &mut Value, path: &str, index: usize) -> FormResult<()> {
    remove_item(target, path, index)
}

/// The default shape for a field spec: empty strings for scalars, empty
/// lists for list kinds, and objects with every declared property defaulted
/// recursively (so a freshly appended structured item is fully editable).
pub fn default_value(spec: &FieldSpec) -> Value {
    match spec.kind {
        FieldKind::Text if spec.numeric => json!(0),
        FieldKind::Text | FieldKind::Textarea | FieldKind::Select | FieldKind::Media => json!(""),
        FieldKind::TagList | FieldKind::Array => Value::Array(Vec::new()),
        FieldKind::Object => {
            let mut map = Map::new();
            for (key, child) in spec.properties.iter().flatten() {
                map.insert(key.clone(), default_value(child));
            }
            Value::Object(map)
        }
    }
}

fn parse_number(raw: &str) -> FormResult<Value> {
    let trimmed = raw.trim();
    if let Ok(integer) = trimmed.parse::<i64>() {
        return Ok(json!(integer));
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if float.is_finite() {
            return Ok(json!(float));
        }
    }
    Err(FormError::NotANumber(raw.to_string()))
}

fn list_at<'a>(target: &'a mut Value, path: &str) -> FormResult<&'a mut Vec<Value>> {
    match content::get_mut(target, path)? {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(FormError::NotAList(path.to_string())),
    }
}
