//! In-memory implementation of the persistence gateway.
//!
//! Backs tests and offline runs. It enforces the same per-page order-index
//! uniqueness constraint a real store would, counts calls per operation,
//! and can be scripted to fail upcoming calls — which is how the bounded
//! retry and rollback paths are exercised.

use crate::dto::{ComponentPayload, ComponentRecord, PageDraft, PageRecord};
use crate::error::{StoreError, StoreResult};
use crate::gateway::PersistenceGateway;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use tokio::sync::Mutex;

/// Gateway operations, for fault scripting and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOp {
    ListComponents,
    CreateComponent,
    UpdateComponent,
    DeleteComponent,
    ReorderComponents,
    CreatePage,
    GetPage,
    CheckSlugExists,
}

#[derive(Debug, Clone)]
struct StoredPage {
    id: i64,
    name: String,
    slug: String,
    category_id: Option<i64>,
    meta_title: String,
    meta_description: String,
    is_homepage: bool,
    is_published: bool,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    pages: HashMap<i64, StoredPage>,
    components: HashMap<i64, ComponentRecord>,
    faults: HashMap<GatewayOp, VecDeque<StoreError>>,
    calls: HashMap<GatewayOp, usize>,
}

impl Inner {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn enter(&mut self, op: GatewayOp) -> StoreResult<()> {
        *self.calls.entry(op).or_insert(0) += 1;
        match self.faults.get_mut(&op).and_then(VecDeque::pop_front) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn page_components(&self, page_id: i64) -> Vec<ComponentRecord> {
        let mut components: Vec<ComponentRecord> = self
            .components
            .values()
            .filter(|c| c.page_id == page_id)
            .cloned()
            .collect();
        components.sort_by_key(|c| c.order_index);
        components
    }

    fn order_index_taken(&self, page_id: i64, order_index: u32, exclude: Option<i64>) -> bool {
        self.components.values().any(|c| {
            c.page_id == page_id && c.order_index == order_index && Some(c.id) != exclude
        })
    }

    fn assemble_page(&self, page: &StoredPage) -> PageRecord {
        PageRecord {
            id: page.id,
            name: page.name.clone(),
            slug: page.slug.clone(),
            category_id: page.category_id,
            meta_title: page.meta_title.clone(),
            meta_description: page.meta_description.clone(),
            is_homepage: page.is_homepage,
            is_published: page.is_published,
            components: self.page_components(page.id),
            created_at: None,
        }
    }
}

#[derive(Default)]
pub struct MemoryGateway {
    inner: Mutex<Inner>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty persisted page and return its id.
    pub async fn seed_page(&self, name: &str, slug: &str) -> i64 {
        let mut inner = self.inner.lock().await;
        let id = inner.allocate_id();
        inner.pages.insert(
            id,
            StoredPage {
                id,
                name: name.to_string(),
                slug: slug.to_string(),
                category_id: None,
                meta_title: String::new(),
                meta_description: String::new(),
                is_homepage: false,
                is_published: false,
            },
        );
        id
    }

    /// Script the next call to `op` to fail with `err`. Faults queue in
    /// FIFO order, one per call.
    pub async fn fail_next(&self, op: GatewayOp, err: StoreError) {
        let mut inner = self.inner.lock().await;
        inner.faults.entry(op).or_default().push_back(err);
    }

    /// How many times `op` has been called (faulted calls included).
    pub async fn calls(&self, op: GatewayOp) -> usize {
        let inner = self.inner.lock().await;
        inner.calls.get(&op).copied().unwrap_or(0)
    }

    /// Stored state of one component, for assertions.
    pub async fn component(&self, component_id: i64) -> Option<ComponentRecord> {
        let inner = self.inner.lock().await;
        inner.components.get(&component_id).cloned()
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn list_components(&self, page_id: i64) -> StoreResult<Vec<ComponentRecord>> {
        let mut inner = self.inner.lock().await;
        inner.enter(GatewayOp::ListComponents)?;
        if !inner.pages.contains_key(&page_id) {
            return Err(StoreError::NotFound(format!("page {page_id}")));
        }
        Ok(inner.page_components(page_id))
    }

    async fn create_component(
        &self,
        page_id: i64,
        payload: ComponentPayload,
    ) -> StoreResult<ComponentRecord> {
        let mut inner = self.inner.lock().await;
        inner.enter(GatewayOp::CreateComponent)?;
        if !inner.pages.contains_key(&page_id) {
            return Err(StoreError::NotFound(format!("page {page_id}")));
        }
        if inner.order_index_taken(page_id, payload.order_index, None) {
            return Err(StoreError::Conflict(format!(
                "order index {} already in use on page {page_id}",
                payload.order_index
            )));
        }

        let id = inner.allocate_id();
        let record = ComponentRecord {
            id,
            page_id,
            component_type: payload.component_type,
            component_name: payload.component_name,
            content_json: payload.content_json,
            order_index: payload.order_index,
            is_visible: payload.is_visible,
            theme: payload.theme,
            updated_at: Some(Utc::now()),
        };
        inner.components.insert(id, record.clone());
        Ok(record)
    }

    async fn update_component(
        &self,
        component_id: i64,
        payload: ComponentPayload,
    ) -> StoreResult<ComponentRecord> {
        let mut inner = self.inner.lock().await;
        inner.enter(GatewayOp::UpdateComponent)?;
        let page_id = match inner.components.get(&component_id) {
            Some(existing) => existing.page_id,
            None => return Err(StoreError::NotFound(format!("component {component_id}"))),
        };
        if inner.order_index_taken(page_id, payload.order_index, Some(component_id)) {
            return Err(StoreError::Conflict(format!(
                "order index {} already in use on page {page_id}",
                payload.order_index
            )));
        }

        let record = inner
            .components
            .get_mut(&component_id)
            .expect("checked above");
        record.component_type = payload.component_type;
        record.component_name = payload.component_name;
        record.content_json = payload.content_json;
        record.order_index = payload.order_index;
        record.is_visible = payload.is_visible;
        record.theme = payload.theme;
        record.updated_at = Some(Utc::now());
        Ok(record.clone())
    }

    async fn delete_component(&self, component_id: i64) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.enter(GatewayOp::DeleteComponent)?;
        if inner.components.remove(&component_id).is_none() {
            return Err(StoreError::NotFound(format!("component {component_id}")));
        }
        Ok(())
    }

    async fn reorder_components(&self, page_id: i64, ordered_ids: &[i64]) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.enter(GatewayOp::ReorderComponents)?;
        if !inner.pages.contains_key(&page_id) {
            return Err(StoreError::NotFound(format!("page {page_id}")));
        }
        for id in ordered_ids {
            match inner.components.get(id) {
                Some(component) if component.page_id == page_id => {}
                _ => {
                    return Err(StoreError::NotFound(format!(
                        "component {id} on page {page_id}"
                    )))
                }
            }
        }

        for (position, id) in ordered_ids.iter().enumerate() {
            if let Some(component) = inner.components.get_mut(id) {
                component.order_index = position as u32 + 1;
                component.updated_at = Some(Utc::now());
            }
        }
        Ok(())
    }

    async fn create_page(&self, draft: PageDraft) -> StoreResult<PageRecord> {
        let mut inner = self.inner.lock().await;
        inner.enter(GatewayOp::CreatePage)?;
        if inner.pages.values().any(|p| p.slug == draft.slug) {
            return Err(StoreError::Server {
                status: 422,
                message: format!("slug {:?} already exists", draft.slug),
            });
        }

        let page_id = inner.allocate_id();
        inner.pages.insert(
            page_id,
            StoredPage {
                id: page_id,
                name: draft.name,
                slug: draft.slug,
                category_id: draft.category_id,
                meta_title: draft.meta_title,
                meta_description: draft.meta_description,
                is_homepage: draft.is_homepage,
                is_published: draft.is_published,
            },
        );
        for payload in draft.components {
            let id = inner.allocate_id();
            inner.components.insert(
                id,
                ComponentRecord {
                    id,
                    page_id,
                    component_type: payload.component_type,
                    component_name: payload.component_name,
                    content_json: payload.content_json,
                    order_index: payload.order_index,
                    is_visible: payload.is_visible,
                    theme: payload.theme,
                    updated_at: Some(Utc::now()),
                },
            );
        }

        let page = inner.pages.get(&page_id).expect("just inserted");
        Ok(inner.assemble_page(page))
    }

    async fn get_page(&self, page_id: i64) -> StoreResult<PageRecord> {
        let mut inner = self.inner.lock().await;
        inner.enter(GatewayOp::GetPage)?;
        match inner.pages.get(&page_id) {
            Some(page) => Ok(inner.assemble_page(page)),
            None => Err(StoreError::NotFound(format!("page {page_id}"))),
        }
    }

    async fn check_slug_exists(&self, slug: &str, exclude_id: Option<i64>) -> StoreResult<bool> {
        let mut inner = self.inner.lock().await;
        inner.enter(GatewayOp::CheckSlugExists)?;
        Ok(inner
            .pages
            .values()
            .any(|p| p.slug == slug && Some(p.id) != exclude_id))
    }
}
