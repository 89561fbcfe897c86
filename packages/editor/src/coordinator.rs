//! # Ordering Coordinator
//!
//! Owns the ordered sequence of blocks for one page and keeps it
//! consistent with the remote store under optimistic mutation.
//!
//! ## Consistency contract
//!
//! Every structural operation (add, remove, move, duplicate) resolves to
//! one of two outcomes: a local state matching a confirmed remote state,
//! or a full authoritative reload from the store. Partial local states
//! never survive a failed structural operation.
//!
//! Order indices are renumbered wholesale after every completed mutation —
//! the invariant is `{1..N}` with no duplicates, not patched gaps.
//!
//! ## Suspension discipline
//!
//! Execution is single-threaded and cooperative: local state is only
//! mutated between awaits, so no locking is needed. Every remote call must
//! treat what it read before the await as a stale snapshot; the store is
//! the reconciliation authority.

use crate::autosave::{AutosaveQueue, PendingSave};
use crate::catalog::ContentCatalog;
use crate::errors::{EditorError, EditorResult};
use crate::options::EditorOptions;
use crate::page::{ComponentInstance, Page, PageDetails, SyncState, Theme};
use pagecraft_common::{humanize_key, valid_slug};
use pagecraft_content as content;
use pagecraft_store::{PageDraft, PersistenceGateway};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

/// Structural component fields that bypass the content model and the
/// autosave debounce.
enum StructuralField {
    IsVisible,
    Theme,
    ComponentType,
    ComponentName,
    OrderIndex,
}

impl StructuralField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "isVisible" => Some(Self::IsVisible),
            "theme" => Some(Self::Theme),
            "componentType" => Some(Self::ComponentType),
            "componentName" => Some(Self::ComponentName),
            "orderIndex" => Some(Self::OrderIndex),
            _ => None,
        }
    }
}

pub struct OrderingCoordinator {
    page: Page,
    gateway: Arc<dyn PersistenceGateway>,
    catalog: Arc<dyn ContentCatalog>,
    options: EditorOptions,
    autosave: AutosaveQueue,
}

impl OrderingCoordinator {
    pub fn new(
        page: Page,
        gateway: Arc<dyn PersistenceGateway>,
        catalog: Arc<dyn ContentCatalog>,
        options: EditorOptions,
    ) -> Self {
        let autosave = AutosaveQueue::new(options.autosave_delay);
        Self {
            page,
            gateway,
            catalog,
            options,
            autosave,
        }
    }

    /// Open an existing page from the store.
    pub async fn load(
        gateway: Arc<dyn PersistenceGateway>,
        catalog: Arc<dyn ContentCatalog>,
        options: EditorOptions,
        page_id: i64,
    ) -> EditorResult<Self> {
        let record = gateway.get_page(page_id).await?;
        Ok(Self::new(Page::from_record(&record), gateway, catalog, options))
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn into_page(self) -> Page {
        self.page
    }

    pub fn component(&self, index: usize) -> EditorResult<&ComponentInstance> {
        self.page.components.get(index).ok_or(EditorError::OutOfBounds {
            index,
            len: self.page.components.len(),
        })
    }

    /// Whether any debounced content save is still waiting to be flushed.
    pub fn has_pending_saves(&self) -> bool {
        !self.autosave.is_empty()
    }

    /// Add a block of `block_type` at the end of the sequence.
    ///
    /// The draft is inserted optimistically; on a persisted page the
    /// create call follows immediately, with a bounded retry on
    /// order-index conflicts. If every attempt fails the draft is removed
    /// again and the error surfaced.
    pub async fn add(&mut self, block_type: &str) -> EditorResult<ComponentInstance> {
        let initial_content = self.catalog.lookup(block_type).unwrap_or_else(|| {
            debug!(block_type, "no catalog entry, starting from empty content");
            json!({})
        });

        let order_index = match self.page.id {
            Some(page_id) => self.next_remote_index(page_id).await?,
            None => self.page.components.len() as u32 + 1,
        };

        let draft = ComponentInstance::draft(
            block_type,
            humanize_key(block_type),
            order_index,
            initial_content,
        );
        self.page.components.push(draft);
        let position = self.page.components.len() - 1;

        if let Some(page_id) = self.page.id {
            if let Err(err) = self.create_with_retry(page_id, position).await {
                self.page.components.remove(position);
                return Err(err);
            }
        }

        Ok(self.page.components[position].clone())
    }

    /// Remove the block at `index`.
    ///
    /// For persisted blocks the remote delete is confirmed first; only
    /// then is the block removed locally and the survivors renumbered. A
    /// failed delete leaves local state untouched.
    pub async fn remove(&mut self, index: usize) -> EditorResult<()> {
        let remote_id = self.component(index)?.id.remote();

        if let Some(remote_id) = remote_id {
            self.page.components[index].sync = SyncState::Deleting;
            if let Err(err) = self.gateway.delete_component(remote_id).await {
                self.page.components[index].sync = SyncState::Persisted;
                return Err(err.into());
            }
            self.autosave.cancel(remote_id);
        }

        self.page.components.remove(index);
        self.page.renumber();
        Ok(())
    }

    /// Relocate the block at `from` to position `to` and renumber.
    ///
    /// One reorder call carries the full new order. On failure the local
    /// arrangement is discarded and replaced by the store's sequence — no
    /// partial patching.
    pub async fn move_component(&mut self, from: usize, to: usize) -> EditorResult<()> {
        let len = self.page.components.len();
        if from >= len {
            return Err(EditorError::OutOfBounds { index: from, len });
        }
        if to >= len {
            return Err(EditorError::OutOfBounds { index: to, len });
        }
        if from == to {
            return Ok(());
        }

        let component = self.page.components.remove(from);
        self.page.components.insert(to, component);
        self.page.renumber();

        if let Some(page_id) = self.page.id {
            let ordered: Vec<i64> = self
                .page
                .components
                .iter()
                .filter_map(|component| component.id.remote())
                .collect();
            if let Err(err) = self.gateway.reorder_components(page_id, &ordered).await {
                warn!(error = %err, "reorder failed, reloading authoritative sequence");
                self.reload_components(page_id).await?;
                return Err(err.into());
            }
        }
        Ok(())
    }

    /// Clone the block at `index` (content and flags) onto the end of the
    /// sequence as a new draft. The clone never inherits the source's
    /// remote identity; persist it explicitly via [`Self::persist_draft`].
    pub fn duplicate(&mut self, index: usize) -> EditorResult<ComponentInstance> {
        let source = self.component(index)?;
        let mut clone = ComponentInstance::draft(
            source.component_type.clone(),
            source.component_name.clone(),
            0,
            source.content.clone(),
        );
        clone.is_visible = source.is_visible;
        clone.theme = source.theme;

        let position = self.page.components.len();
        self.page.components.push(clone);
        self.page.renumber();
        Ok(self.page.components[position].clone())
    }

    /// Run the bounded create loop for an existing draft on a persisted
    /// page. The draft keeps its place in the local sequence on failure.
    pub async fn persist_draft(&mut self, index: usize) -> EditorResult<()> {
        let page_id = self.page.id.ok_or(EditorError::PageNotPersisted)?;
        let component = self.component(index)?;
        if !component.id.is_temp() {
            return Err(EditorError::Validation(format!(
                "component at {index} is already persisted"
            )));
        }

        let next = self.next_remote_index(page_id).await?;
        self.page.components[index].order_index = next;
        if let Err(err) = self.create_with_retry(page_id, index).await {
            self.page.components[index].sync = SyncState::Draft;
            return Err(err);
        }
        Ok(())
    }

    /// Update one field of the block at `index`.
    ///
    /// Structural fields (`isVisible`, `theme`, `componentType`,
    /// `componentName`, `orderIndex`) are applied directly and, for
    /// persisted blocks, sent immediately with rollback on failure. Any
    /// other name is a content path: the edit goes through the content
    /// model and a debounced save is scheduled.
    pub async fn update_field(
        &mut self,
        index: usize,
        field: &str,
        value: Value,
    ) -> EditorResult<()> {
        self.component(index)?;
        match StructuralField::parse(field) {
            Some(structural) => self.update_structural(index, structural, value).await,
            None => self.update_content(index, field, value),
        }
    }

    /// Replace the block's whole content from raw JSON text (the raw-text
    /// editing mode). Invalid JSON is rejected and the last valid content
    /// retained.
    pub fn update_content_text(&mut self, index: usize, raw: &str) -> EditorResult<()> {
        self.component(index)?;
        let parsed: Value = serde_json::from_str(raw)
            .map_err(|err| EditorError::Validation(format!("invalid content JSON: {err}")))?;

        let baseline = self.page.components[index].content.clone();
        self.page.components[index].content = parsed;
        if let Some(remote_id) = self.page.components[index].id.remote() {
            self.autosave.schedule(remote_id, &baseline);
        }
        Ok(())
    }

    /// Wait for the earliest pending autosave deadline, then send every
    /// save that is due. Does nothing when the queue is empty.
    pub async fn flush_due(&mut self) -> EditorResult<()> {
        let Some(deadline) = self.autosave.next_deadline() else {
            return Ok(());
        };
        sleep_until(deadline).await;
        let due = self.autosave.take_due(Instant::now());
        self.push_updates(due).await
    }

    /// Send every pending save now, regardless of deadline. Used when the
    /// operator leaves the page.
    pub async fn flush_all(&mut self) -> EditorResult<()> {
        let pending = self.autosave.take_all();
        self.push_updates(pending).await
    }

    /// Persist an unpersisted page: one create call carrying the page
    /// metadata and every component. Local drafts adopt the server-issued
    /// identities in place.
    pub async fn save_page(&mut self, details: PageDetails) -> EditorResult<()> {
        if self.page.is_persisted() {
            return Err(EditorError::PageAlreadyPersisted);
        }
        if details.name.trim().is_empty() {
            return Err(EditorError::Validation("page name is required".to_string()));
        }
        if !valid_slug(&details.slug) {
            return Err(EditorError::Validation(format!(
                "malformed slug {:?}",
                details.slug
            )));
        }
        if self.gateway.check_slug_exists(&details.slug, None).await? {
            return Err(EditorError::Validation(format!(
                "slug {:?} is already in use",
                details.slug
            )));
        }

        self.page.renumber();
        let draft = PageDraft {
            name: details.name,
            slug: details.slug,
            category_id: details.category_id,
            meta_title: details.meta_title,
            meta_description: details.meta_description,
            is_homepage: details.is_homepage,
            is_published: details.is_published,
            components: self
                .page
                .components
                .iter()
                .map(ComponentInstance::to_payload)
                .collect(),
        };

        let record = self.gateway.create_page(draft).await?;
        self.page = Page::from_record(&record);
        Ok(())
    }

    /// Replace the local sequence with the store's.
    pub async fn reload(&mut self) -> EditorResult<()> {
        let page_id = self.page.id.ok_or(EditorError::PageNotPersisted)?;
        self.reload_components(page_id).await
    }

    async fn reload_components(&mut self, page_id: i64) -> EditorResult<()> {
        let records = self.gateway.list_components(page_id).await?;
        let mut components: Vec<ComponentInstance> = records
            .iter()
            .map(ComponentInstance::from_record)
            .collect();
        components.sort_by_key(|component| component.order_index);
        self.page.components = components;
        self.page.renumber();
        // local edits were just discarded with the sequence they applied to
        self.autosave.clear();
        Ok(())
    }

    /// Bounded create loop for the draft at `position`.
    ///
    /// An order-index conflict refetches the remote sequence, recomputes
    /// the next index and retries, up to the configured limit. Any other
    /// error aborts immediately. On success the draft is replaced in place
    /// by the persisted record.
    async fn create_with_retry(&mut self, page_id: i64, position: usize) -> EditorResult<()> {
        let limit = self.options.create_retry_limit.max(1);
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            self.page.components[position].sync = SyncState::Persisting;
            let payload = self.page.components[position].to_payload();

            match self.gateway.create_component(page_id, payload).await {
                Ok(record) => {
                    self.page.components[position] = ComponentInstance::from_record(&record);
                    return Ok(());
                }
                Err(err) if err.is_conflict() && attempt < limit => {
                    debug!(attempt, "order index conflict on create, refetching sequence");
                    let next = self.next_remote_index(page_id).await?;
                    self.page.components[position].order_index = next;
                }
                Err(err) if err.is_conflict() => {
                    warn!(
                        attempts = attempt,
                        "create retries exhausted on order index conflict"
                    );
                    return Err(EditorError::CreateExhausted { attempts: attempt });
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    async fn next_remote_index(&self, page_id: i64) -> EditorResult<u32> {
        let remote = self.gateway.list_components(page_id).await?;
        let max = remote
            .iter()
            .map(|component| component.order_index)
            .max()
            .unwrap_or(0);
        Ok(max + 1)
    }

    async fn update_structural(
        &mut self,
        index: usize,
        field: StructuralField,
        value: Value,
    ) -> EditorResult<()> {
        let previous = self.page.components[index].clone();

        {
            let component = &mut self.page.components[index];
            match field {
                StructuralField::IsVisible => {
                    component.is_visible = value.as_bool().ok_or_else(|| {
                        EditorError::Validation(format!("isVisible expects a boolean, got {value}"))
                    })?;
                }
                StructuralField::Theme => {
                    let raw = value
                        .as_u64()
                        .and_then(|raw| u8::try_from(raw).ok())
                        .ok_or_else(|| {
                            EditorError::Validation(format!("theme expects 1 or 2, got {value}"))
                        })?;
                    component.theme = Theme::try_from(raw).map_err(EditorError::Validation)?;
                }
                StructuralField::ComponentType => {
                    component.component_type = expect_string("componentType", &value)?;
                }
                StructuralField::ComponentName => {
                    component.component_name = expect_string("componentName", &value)?;
                }
                StructuralField::OrderIndex => {
                    component.order_index = value
                        .as_u64()
                        .and_then(|raw| u32::try_from(raw).ok())
                        .ok_or_else(|| {
                            EditorError::Validation(format!(
                                "orderIndex expects a positive integer, got {value}"
                            ))
                        })?;
                }
            }
        }

        // Structural updates bypass the debounce and go out immediately.
        if let Some(remote_id) = self.page.components[index].id.remote() {
            self.page.components[index].sync = SyncState::Updating;
            let payload = self.page.components[index].to_payload();
            match self.gateway.update_component(remote_id, payload).await {
                Ok(_) => self.page.components[index].sync = SyncState::Persisted,
                Err(err) => {
                    warn!(component = remote_id, error = %err, "structural update failed, rolling back");
                    self.page.components[index] = previous;
                    return Err(err.into());
                }
            }
        }
        Ok(())
    }

    fn update_content(&mut self, index: usize, path: &str, value: Value) -> EditorResult<()> {
        let baseline = self.page.components[index].content.clone();
        content::set(&mut self.page.components[index].content, path, value)?;

        if let Some(remote_id) = self.page.components[index].id.remote() {
            self.autosave.schedule(remote_id, &baseline);
        }
        Ok(())
    }

    async fn push_updates(&mut self, saves: Vec<PendingSave>) -> EditorResult<()> {
        let mut first_error = None;

        for save in saves {
            // The component may have been removed while its save was
            // pending; cancellation on remove covers the common path, this
            // covers saves taken before the removal.
            let Some(index) = self
                .page
                .components
                .iter()
                .position(|component| component.id.remote() == Some(save.component_id))
            else {
                continue;
            };

            self.page.components[index].sync = SyncState::Updating;
            let payload = self.page.components[index].to_payload();
            match self
                .gateway
                .update_component(save.component_id, payload)
                .await
            {
                Ok(_) => self.page.components[index].sync = SyncState::Persisted,
                Err(err) => {
                    warn!(component = save.component_id, error = %err, "autosave failed, rolling content back");
                    let component = &mut self.page.components[index];
                    component.content = save.baseline;
                    component.sync = SyncState::Persisted;
                    if first_error.is_none() {
                        first_error = Some(EditorError::from(err));
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn expect_string(field: &str, value: &Value) -> EditorResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| EditorError::Validation(format!("{field} expects a string, got {value}")))
}
