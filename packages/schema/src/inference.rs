//! # Schema Inference
//!
//! Derives an editable-field schema from an example JSON document when no
//! schema was declared for a block type.
//!
//! Inference is deterministic for a given sample and total: it never fails,
//! falling back to an empty schema for samples it cannot introspect. Scalars
//! map to text-flavored fields, arrays to tag lists or recursive `Array`
//! fields (element shape from the first element), objects to recursive
//! `Object` fields.

use crate::options::InferenceOptions;
use crate::types::{ComponentSchema, FieldKind, FieldSpec};
use pagecraft_common::humanize_key;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Schema inference engine
pub struct SchemaInference {
    options: InferenceOptions,
}

impl Default for SchemaInference {
    fn default() -> Self {
        Self::new(InferenceOptions::default())
    }
}

impl SchemaInference {
    pub fn new(options: InferenceOptions) -> Self {
        Self { options }
    }

    /// Infer a component schema from a sample content value.
    ///
    /// Only object samples yield editable fields; a scalar or array at the
    /// top level has no field names to hang a form on and falls back to the
    /// empty schema.
    pub fn infer(&self, sample: &Value) -> ComponentSchema {
        match sample {
            Value::Object(map) => {
                let mut properties = BTreeMap::new();
                for (key, value) in map {
                    properties.insert(key.clone(), self.infer_field(key, value));
                }
                ComponentSchema::new(properties)
            }
            other => {
                debug!(
                    sample_type = value_type_name(other),
                    "non-object sample, inferring empty schema"
                );
                ComponentSchema::empty()
            }
        }
    }

    fn infer_field(&self, key: &str, value: &Value) -> FieldSpec {
        let label = self.label_for(key);

        match value {
            Value::String(text) => {
                if text.len() >= self.options.textarea_threshold {
                    FieldSpec::textarea(label)
                } else {
                    FieldSpec::text(label)
                }
            }
            Value::Number(_) => FieldSpec::text(label).numeric(),
            // Booleans and nulls stay plain text fields; richer widgets
            // only come from declared schemas.
            Value::Bool(_) | Value::Null => FieldSpec::text(label),
            Value::Array(items) => self.infer_array(key, label, items),
            Value::Object(map) => {
                let mut properties = BTreeMap::new();
                for (child_key, child_value) in map {
                    properties.insert(child_key.clone(), self.infer_field(child_key, child_value));
                }
                FieldSpec::object(label, properties)
            }
        }
    }

    fn infer_array(&self, key: &str, label: String, items: &[Value]) -> FieldSpec {
        let all_strings = !items.is_empty() && items.iter().all(Value::is_string);
        if all_strings && self.options.tag_list_for_string_arrays {
            return FieldSpec::tag_list(label);
        }

        // Element shape comes from the first element; an empty array gives
        // a bare string item so the list is still editable.
        let item_spec = match items.first() {
            Some(first) => self.infer_field(key, first),
            None => FieldSpec::text(self.label_for(key)),
        };
        FieldSpec::array(label, item_spec)
    }

    fn label_for(&self, key: &str) -> String {
        if self.options.humanize_labels {
            humanize_key(key)
        } else {
            key.to_string()
        }
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
