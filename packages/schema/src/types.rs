use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Editable field kinds resolved once per field, either from a declared
/// schema or from inference. Rendering dispatches on this closed variant
/// instead of re-inspecting raw JSON shapes at every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Single-line string (or number when [`FieldSpec::numeric`] is set)
    Text,

    /// Multi-line string
    Textarea,

    /// Enumerated string from [`FieldSpec::options`]
    Select,

    /// Asset URL; resolution of the referenced asset is external
    Media,

    /// Ordered list of strings
    TagList,

    /// Nested object with declared [`FieldSpec::properties`]
    Object,

    /// Homogeneous list; element shape in [`FieldSpec::items`]
    Array,
}

/// Declarative description of one editable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub kind: FieldKind,

    pub label: String,

    #[serde(default)]
    pub required: bool,

    /// Numeric scalars render as numeric input and coerce back to numbers
    /// on write. Only meaningful for `Text`.
    #[serde(default)]
    pub numeric: bool,

    /// Choices for `Select`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// Element schema for `Array`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<FieldSpec>>,

    /// Property schemas for `Object`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, FieldSpec>>,
}

impl FieldSpec {
    pub fn text(label: impl Into<String>) -> Self {
        Self::new(FieldKind::Text, label)
    }

    pub fn textarea(label: impl Into<String>) -> Self {
        Self::new(FieldKind::Textarea, label)
    }

    pub fn select(label: impl Into<String>, options: Vec<String>) -> Self {
        let mut spec = Self::new(FieldKind::Select, label);
        spec.options = Some(options);
        spec
    }

    pub fn media(label: impl Into<String>) -> Self {
        Self::new(FieldKind::Media, label)
    }

    pub fn tag_list(label: impl Into<String>) -> Self {
        Self::new(FieldKind::TagList, label)
    }

    pub fn object(label: impl Into<String>, properties: BTreeMap<String, FieldSpec>) -> Self {
        let mut spec = Self::new(FieldKind::Object, label);
        spec.properties = Some(properties);
        spec
    }

    pub fn array(label: impl Into<String>, items: FieldSpec) -> Self {
        let mut spec = Self::new(FieldKind::Array, label);
        spec.items = Some(Box::new(items));
        spec
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    fn new(kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            required: false,
            numeric: false,
            options: None,
            items: None,
            properties: None,
        }
    }
}

/// The editable surface of one block type: a map of field name to spec.
///
/// Schemas nest to arbitrary depth through `Object` and `Array` specs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentSchema {
    #[serde(default)]
    pub properties: BTreeMap<String, FieldSpec>,
}

impl ComponentSchema {
    pub fn new(properties: BTreeMap<String, FieldSpec>) -> Self {
        Self { properties }
    }

    /// Schema with no editable fields (the total-fallback shape).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
