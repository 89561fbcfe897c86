//! # Persistence Gateway
//!
//! The abstract remote-store operations the editor consumes. Implementors
//! translate transport failures into the [`StoreError`] taxonomy; callers
//! never see raw transport errors, and only an order-index uniqueness
//! violation may surface as [`StoreError::Conflict`].

use crate::dto::{ComponentPayload, ComponentRecord, PageDraft, PageRecord};
use crate::error::StoreResult;
use async_trait::async_trait;

#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// All components of a page, in stored order.
    async fn list_components(&self, page_id: i64) -> StoreResult<Vec<ComponentRecord>>;

    /// Create one component on an existing page.
    async fn create_component(
        &self,
        page_id: i64,
        payload: ComponentPayload,
    ) -> StoreResult<ComponentRecord>;

    /// Replace a component's stored fields.
    async fn update_component(
        &self,
        component_id: i64,
        payload: ComponentPayload,
    ) -> StoreResult<ComponentRecord>;

    /// Delete one component.
    async fn delete_component(&self, component_id: i64) -> StoreResult<()>;

    /// Persist a full new ordering for a page's components.
    async fn reorder_components(&self, page_id: i64, ordered_ids: &[i64]) -> StoreResult<()>;

    /// Create a page and all of its components in one call.
    async fn create_page(&self, draft: PageDraft) -> StoreResult<PageRecord>;

    /// Fetch a page with its components.
    async fn get_page(&self, page_id: i64) -> StoreResult<PageRecord>;

    /// Whether `slug` is already taken by a page other than `exclude_id`.
    async fn check_slug_exists(&self, slug: &str, exclude_id: Option<i64>) -> StoreResult<bool>;
}
