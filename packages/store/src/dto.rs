//! Wire types for the remote store.
//!
//! Everything serializes camelCase, and component content always crosses
//! the boundary as a serialized JSON string (`contentJson`) even though it
//! is manipulated as a structured value in-process.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A component as the remote store knows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub id: i64,
    pub page_id: i64,
    pub component_type: String,
    pub component_name: String,
    pub content_json: String,
    pub order_index: u32,
    pub is_visible: bool,
    pub theme: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for component create and update calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPayload {
    pub component_type: String,
    pub component_name: String,
    pub content_json: String,
    pub order_index: u32,
    pub is_visible: bool,
    pub theme: u8,
}

/// A page as the remote store knows it, components in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    pub is_homepage: bool,
    pub is_published: bool,
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for the single create call that persists a page and all of its
/// components at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDraft {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    pub is_homepage: bool,
    pub is_published: bool,
    pub components: Vec<ComponentPayload>,
}
