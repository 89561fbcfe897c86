//! # Form Renderer
//!
//! Recursively turns a resolved [`ComponentSchema`] plus the block's
//! current JSON value into a [`Form`] of editable widgets.
//!
//! ## Determinism contract
//!
//! Rendering is a pure function of `(schema, value)`: no hidden state, no
//! environment dependence, identical output on every invocation. Field
//! dispatch happens on the schema's closed [`FieldKind`], resolved once per
//! field; raw JSON shapes are never re-inspected at render time.
//!
//! ## Failure semantics
//!
//! When the schema and the actual value disagree in shape (a string where
//! the schema declares `object`, say), the renderer degrades that field to
//! [`Widget::Unconfigured`] and logs the discrepancy. Rendering never
//! fails.

use crate::widget::{Form, Widget};
use pagecraft_schema::{ComponentSchema, FieldKind, FieldSpec};
use serde_json::Value;
use tracing::warn;

/// Render a form for `value` under `schema`.
pub fn render(schema: &ComponentSchema, value: &Value) -> Form {
    let widgets = schema
        .properties
        .iter()
        .map(|(key, spec)| {
            let field_value = value.as_object().and_then(|map| map.get(key));
            render_field(spec, field_value, key.clone())
        })
        .collect();

    Form { widgets }
}

/// Render a single field. `value` is `None` when the payload has no entry
/// at this field's path.
pub fn render_field(spec: &FieldSpec, value: Option<&Value>, path: String) -> Widget {
    match spec.kind {
        FieldKind::Text => render_text(spec, value, path),
        FieldKind::Textarea => render_textarea(spec, value, path),
        FieldKind::Select => render_select(spec, value, path),
        FieldKind::Media => render_media(spec, value, path),
        FieldKind::TagList => render_tag_list(spec, value, path),
        FieldKind::Object => render_group(spec, value, path),
        FieldKind::Array => render_list(spec, value, path),
    }
}

fn render_text(spec: &FieldSpec, value: Option<&Value>, path: String) -> Widget {
    let numeric = spec.numeric || matches!(value, Some(Value::Number(_)));
    match scalar_text(value) {
        Some(text) => Widget::Text {
            path,
            label: spec.label.clone(),
            value: text,
            numeric,
            required: spec.required,
        },
        None => unconfigured(spec, path, value, "scalar"),
    }
}

fn render_textarea(spec: &FieldSpec, value: Option<&Value>, path: String) -> Widget {
    match scalar_text(value) {
        Some(text) => Widget::Textarea {
            path,
            label: spec.label.clone(),
            value: text,
            required: spec.required,
        },
        None => unconfigured(spec, path, value, "scalar"),
    }
}

fn render_select(spec: &FieldSpec, value: Option<&Value>, path: String) -> Widget {
    match value {
        None | Some(Value::Null) | Some(Value::String(_)) => Widget::Select {
            path,
            label: spec.label.clone(),
            value: value
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            options: spec.options.clone().unwrap_or_default(),
            required: spec.required,
        },
        _ => unconfigured(spec, path, value, "string"),
    }
}

fn render_media(spec: &FieldSpec, value: Option<&Value>, path: String) -> Widget {
    match value {
        None | Some(Value::Null) | Some(Value::String(_)) => Widget::Media {
            path,
            label: spec.label.clone(),
            url: value
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            required: spec.required,
        },
        _ => unconfigured(spec, path, value, "string URL"),
    }
}

fn render_tag_list(spec: &FieldSpec, value: Option<&Value>, path: String) -> Widget {
    let tags = match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => {
            let mut tags = Vec::with_capacity(items.len());
            for item in items {
                match item.as_str() {
                    Some(tag) => tags.push(tag.to_string()),
                    None => return unconfigured(spec, path, value, "list of strings"),
                }
            }
            tags
        }
        _ => return unconfigured(spec, path, value, "list of strings"),
    };

    Widget::TagList {
        path,
        label: spec.label.clone(),
        tags,
    }
}

fn render_group(spec: &FieldSpec, value: Option<&Value>, path: String) -> Widget {
    let object = match value {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        _ => return unconfigured(spec, path, value, "object"),
    };

    let children = spec
        .properties
        .iter()
        .flatten()
        .map(|(key, child_spec)| {
            let child_value = object.and_then(|map| map.get(key));
            render_field(child_spec, child_value, format!("{path}.{key}"))
        })
        .collect();

    Widget::Group {
        path,
        label: spec.label.clone(),
        children,
    }
}

fn render_list(spec: &FieldSpec, value: Option<&Value>, path: String) -> Widget {
    let Some(items_spec) = spec.items.as_deref() else {
        return unconfigured(spec, path, value, "list with a declared item shape");
    };

    let elements = match value {
        None | Some(Value::Null) => &[] as &[Value],
        Some(Value::Array(items)) => items.as_slice(),
        _ => return unconfigured(spec, path, value, "list"),
    };

    let children = elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let mut child_spec = items_spec.clone();
            child_spec.label = format!("{} {}", items_spec.label, index + 1);
            render_field(&child_spec, Some(element), format!("{path}[{index}]"))
        })
        .collect();

    Widget::List {
        path,
        label: spec.label.clone(),
        scalar_items: items_spec.kind != FieldKind::Object,
        children,
    }
}

fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => None,
    }
}

fn unconfigured(spec: &FieldSpec, path: String, value: Option<&Value>, expected: &str) -> Widget {
    let found = match value {
        None => "nothing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "a boolean",
        Some(Value::Number(_)) => "a number",
        Some(Value::String(_)) => "a string",
        Some(Value::Array(_)) => "a list",
        Some(Value::Object(_)) => "an object",
    };
    let reason = format!("expected {expected}, found {found}");
    warn!(path = %path, %reason, "field shape mismatch, rendering unconfigured");

    Widget::Unconfigured {
        path,
        label: spec.label.clone(),
        reason,
    }
}
