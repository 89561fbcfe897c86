//! # Schema Registry
//!
//! Maps a block-type name to its declared [`ComponentSchema`]. Block types
//! with no declared schema fall back to runtime inference over the block's
//! current content, so every block is editable even without per-type code.

use crate::inference::SchemaInference;
use crate::types::ComponentSchema;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

pub struct SchemaRegistry {
    declared: HashMap<String, ComponentSchema>,
    inference: SchemaInference,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new(SchemaInference::default())
    }
}

impl SchemaRegistry {
    pub fn new(inference: SchemaInference) -> Self {
        Self {
            declared: HashMap::new(),
            inference,
        }
    }

    /// Declare the schema for a block type, replacing any previous one.
    pub fn register(&mut self, block_type: impl Into<String>, schema: ComponentSchema) {
        self.declared.insert(block_type.into(), schema);
    }

    pub fn declared(&self, block_type: &str) -> Option<&ComponentSchema> {
        self.declared.get(block_type)
    }

    /// Resolve the schema for a block type: declared if registered,
    /// otherwise inferred from the block's current content.
    pub fn resolve(&self, block_type: &str, sample: &Value) -> ComponentSchema {
        if let Some(schema) = self.declared.get(block_type) {
            return schema.clone();
        }
        debug!(block_type, "no declared schema, inferring from content");
        self.inference.infer(sample)
    }
}
