//! # Pagecraft Store
//!
//! The persistence boundary: an abstract gateway over the remote store,
//! its wire types, and the error taxonomy the rest of the workspace
//! programs against.
//!
//! Two implementations ship here:
//!
//! - [`HttpGateway`] — REST client for a real store
//! - [`MemoryGateway`] — in-memory store with the same uniqueness
//!   constraint, plus fault scripting and call counters for tests
//!
//! The conflict-signaling contract lives in [`StoreError::is_conflict`]:
//! an order-index uniqueness violation is distinguishable from every other
//! failure, because it alone triggers the editor's refetch-and-retry path.

pub mod dto;
pub mod error;
pub mod gateway;
pub mod http;
pub mod memory;

pub use dto::{ComponentPayload, ComponentRecord, PageDraft, PageRecord};
pub use error::{StoreError, StoreResult};
pub use gateway::PersistenceGateway;
pub use http::HttpGateway;
pub use memory::{GatewayOp, MemoryGateway};
