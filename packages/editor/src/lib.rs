//! # Pagecraft Editor
//!
//! Ordering and persistence coordination for page editing.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ form / content: field edits on one block    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: ordered block sequence + lifecycle  │
//! │  - add / remove / move / duplicate          │
//! │  - optimistic mutation, rollback on failure │
//! │  - per-component debounced autosave         │
//! │  - bounded retry on order-index conflicts   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: abstract gateway to the remote store │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The page is a single owned value**: operations take `&mut self`
//!    and leave a consistent snapshot, never ambient state
//! 2. **Optimistic locally, authoritative remotely**: local changes apply
//!    first; a failed call rolls back or triggers a full reload
//! 3. **Order indices are renumbered, not patched**: after every completed
//!    mutation they are exactly `1..=N`
//! 4. **Conflicts retry bounded, everything else aborts**: only the
//!    order-index uniqueness conflict refetches and retries (≤ 3 attempts)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{EditorOptions, OrderingCoordinator, StaticCatalog};
//! use pagecraft_store::HttpGateway;
//! use std::sync::Arc;
//!
//! let gateway = Arc::new(HttpGateway::new("https://cms.example/api"));
//! let catalog = Arc::new(StaticCatalog::new());
//! let mut editor =
//!     OrderingCoordinator::load(gateway, catalog, EditorOptions::default(), page_id).await?;
//!
//! editor.add("hero").await?;
//! editor.update_field(0, "hero.title", "Welcome".into()).await?;
//! editor.flush_all().await?;
//! ```

pub mod autosave;
pub mod catalog;
pub mod coordinator;
pub mod errors;
pub mod options;
pub mod page;

pub use autosave::{AutosaveQueue, PendingSave};
pub use catalog::{ContentCatalog, StaticCatalog};
pub use coordinator::OrderingCoordinator;
pub use errors::{EditorError, EditorResult};
pub use options::EditorOptions;
pub use page::{ComponentId, ComponentInstance, Page, PageDetails, SyncState, Theme};
