//! # Page Model
//!
//! The locally-owned state of one page under editing: its metadata and the
//! ordered sequence of content blocks. The coordinator passes this value
//! through every operation explicitly; nothing lives in ambient state.
//!
//! ## Lifecycle
//!
//! ```text
//! Draft ──create ok──► Persisted ──updates──► Persisted ──delete──► gone
//!   │                      ▲
//!   └──conflict ≤3, retry──┘        (retries exhausted → draft removed)
//! ```
//!
//! A component is either *Draft* (temporary string id, no remote
//! counterpart) or *Persisted* (integer id mirrored remotely), never both.

use pagecraft_content::{from_boundary_json, to_boundary_json};
use pagecraft_store::{ComponentPayload, ComponentRecord, PageRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Identity of a component relative to the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentId {
    /// Server-issued identity of a persisted component
    Remote(i64),
    /// Local-only identity of a draft (`temp-<uuid>`)
    Temp(String),
}

impl ComponentId {
    pub fn new_temp() -> Self {
        ComponentId::Temp(format!("temp-{}", Uuid::new_v4()))
    }

    pub fn is_temp(&self) -> bool {
        matches!(self, ComponentId::Temp(_))
    }

    pub fn remote(&self) -> Option<i64> {
        match self {
            ComponentId::Remote(id) => Some(*id),
            ComponentId::Temp(_) => None,
        }
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentId::Remote(id) => write!(f, "{id}"),
            ComponentId::Temp(id) => write!(f, "{id}"),
        }
    }
}

/// Visual theme of a block, serialized as `1 | 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Theme {
    One,
    Two,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::One
    }
}

impl From<Theme> for u8 {
    fn from(theme: Theme) -> u8 {
        match theme {
            Theme::One => 1,
            Theme::Two => 2,
        }
    }
}

impl TryFrom<u8> for Theme {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(Theme::One),
            2 => Ok(Theme::Two),
            other => Err(format!("theme must be 1 or 2, got {other}")),
        }
    }
}

/// Observable persistence state of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// Local only, no remote counterpart
    #[default]
    Draft,
    /// Create in flight (including bounded conflict retries)
    Persisting,
    /// Mirrored remotely
    Persisted,
    /// Update in flight
    Updating,
    /// Delete in flight
    Deleting,
}

/// One content block within a page's ordered sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInstance {
    pub id: ComponentId,
    pub component_type: String,
    pub component_name: String,
    pub order_index: u32,
    pub is_visible: bool,
    pub theme: Theme,
    pub content: Value,
    #[serde(skip)]
    pub sync: SyncState,
}

impl ComponentInstance {
    /// A fresh draft block with a temporary id.
    pub fn draft(
        component_type: impl Into<String>,
        component_name: impl Into<String>,
        order_index: u32,
        content: Value,
    ) -> Self {
        Self {
            id: ComponentId::new_temp(),
            component_type: component_type.into(),
            component_name: component_name.into(),
            order_index,
            is_visible: true,
            theme: Theme::One,
            content,
            sync: SyncState::Draft,
        }
    }

    /// Local mirror of a stored record. Malformed stored content degrades
    /// to `{}` (see the content boundary codec).
    pub fn from_record(record: &ComponentRecord) -> Self {
        Self {
            id: ComponentId::Remote(record.id),
            component_type: record.component_type.clone(),
            component_name: record.component_name.clone(),
            order_index: record.order_index,
            is_visible: record.is_visible,
            theme: Theme::try_from(record.theme).unwrap_or_default(),
            content: from_boundary_json(&record.content_json),
            sync: SyncState::Persisted,
        }
    }

    /// Wire payload for create/update calls.
    pub fn to_payload(&self) -> ComponentPayload {
        ComponentPayload {
            component_type: self.component_type.clone(),
            component_name: self.component_name.clone(),
            content_json: to_boundary_json(&self.content),
            order_index: self.order_index,
            is_visible: self.is_visible,
            theme: self.theme.into(),
        }
    }
}

/// Page-level metadata supplied when saving a page for the first time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDetails {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub is_homepage: bool,
    #[serde(default)]
    pub is_published: bool,
}

/// A page and its ordered component sequence.
///
/// Invariant: after every completed mutation, the `order_index` values of
/// `components` are exactly `1..=N` in sequence order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub is_homepage: bool,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub components: Vec<ComponentInstance>,
}

impl Page {
    /// An empty, unpersisted page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Local mirror of a stored page, order indices normalized.
    pub fn from_record(record: &PageRecord) -> Self {
        let mut components: Vec<ComponentInstance> = record
            .components
            .iter()
            .map(ComponentInstance::from_record)
            .collect();
        components.sort_by_key(|component| component.order_index);

        let mut page = Self {
            id: Some(record.id),
            name: record.name.clone(),
            slug: record.slug.clone(),
            category_id: record.category_id,
            meta_title: record.meta_title.clone(),
            meta_description: record.meta_description.clone(),
            is_homepage: record.is_homepage,
            is_published: record.is_published,
            components,
        };
        page.renumber();
        page
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Rewrite every component's order index to its 1-based position.
    pub fn renumber(&mut self) {
        for (position, component) in self.components.iter_mut().enumerate() {
            component.order_index = position as u32 + 1;
        }
    }

    pub fn order_indices(&self) -> Vec<u32> {
        self.components
            .iter()
            .map(|component| component.order_index)
            .collect()
    }

    /// Whether the order invariant holds: indices are exactly `1..=N`.
    pub fn order_is_contiguous(&self) -> bool {
        self.components
            .iter()
            .enumerate()
            .all(|(position, component)| component.order_index == position as u32 + 1)
    }

    /// Restore derived state after deserializing a page file: components
    /// with remote ids are persisted, the rest stay drafts.
    pub fn normalize_sync(&mut self) {
        for component in &mut self.components {
            component.sync = if component.id.is_temp() {
                SyncState::Draft
            } else {
                SyncState::Persisted
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn draft_gets_temp_id() {
        let draft = ComponentInstance::draft("hero", "Hero", 1, json!({}));
        assert!(draft.id.is_temp());
        assert!(matches!(&draft.id, ComponentId::Temp(id) if id.starts_with("temp-")));
        assert_eq!(draft.sync, SyncState::Draft);
    }

    #[test]
    fn renumber_restores_contiguous_indices() {
        let mut page = Page::new();
        for index in [7u32, 2, 9] {
            page.components
                .push(ComponentInstance::draft("hero", "Hero", index, json!({})));
        }
        assert!(!page.order_is_contiguous());

        page.renumber();
        assert_eq!(page.order_indices(), vec![1, 2, 3]);
        assert!(page.order_is_contiguous());
    }

    #[test]
    fn page_round_trips_through_json() {
        let mut page = Page::new();
        page.name = "Home".to_string();
        page.slug = "home".to_string();
        page.components
            .push(ComponentInstance::draft("hero", "Hero", 1, json!({"t": 1})));

        let text = serde_json::to_string(&page).unwrap();
        let mut back: Page = serde_json::from_str(&text).unwrap();
        back.normalize_sync();

        assert_eq!(back.name, "Home");
        assert_eq!(back.components.len(), 1);
        assert!(back.components[0].id.is_temp());
        assert_eq!(back.components[0].sync, SyncState::Draft);
    }

    #[test]
    fn theme_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Theme::Two).unwrap(), "2");
        let theme: Theme = serde_json::from_str("1").unwrap();
        assert_eq!(theme, Theme::One);
        assert!(serde_json::from_str::<Theme>("3").is_err());
    }
}
