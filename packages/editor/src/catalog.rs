//! # Content Catalog
//!
//! The default-content collaborator: when the operator adds a block, its
//! initial payload comes from a catalog keyed by component type. The
//! catalog itself is external to this system; the trait is the seam.

use serde_json::Value;
use std::collections::HashMap;

pub trait ContentCatalog: Send + Sync {
    /// Default content for a block type, if the catalog knows it.
    fn lookup(&self, component_type: &str) -> Option<Value>;
}

/// Map-backed catalog for tests and offline tooling.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: HashMap<String, Value>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, component_type: impl Into<String>, content: Value) {
        self.entries.insert(component_type.into(), content);
    }

    pub fn with_entry(mut self, component_type: impl Into<String>, content: Value) -> Self {
        self.insert(component_type, content);
        self
    }
}

impl ContentCatalog for StaticCatalog {
    fn lookup(&self, component_type: &str) -> Option<Value> {
        self.entries.get(component_type).cloned()
    }
}
