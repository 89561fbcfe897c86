//! # Pagecraft Schema
//!
//! Declarative field schemas for content blocks, plus runtime inference
//! for block types that never declared one.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ SchemaRegistry: block type → ComponentSchema │
//! └──────────────────────────────────────────────┘
//!          │ declared              │ absent
//!          ▼                       ▼
//!   ComponentSchema      SchemaInference(sample) → ComponentSchema
//! ```
//!
//! A [`ComponentSchema`] is a map of field name to [`FieldSpec`]; specs
//! nest to arbitrary depth through `Object` and `Array` kinds. The form
//! layer consumes resolved schemas and never re-inspects raw JSON shapes.

pub mod inference;
pub mod options;
pub mod registry;
pub mod types;

pub use inference::SchemaInference;
pub use options::InferenceOptions;
pub use registry::SchemaRegistry;
pub use types::{ComponentSchema, FieldKind, FieldSpec};
