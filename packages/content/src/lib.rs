//! # Pagecraft Content
//!
//! Path-addressable access to a content block's JSON payload.
//!
//! Every block on a page carries an arbitrary JSON value. Both editing
//! surfaces — the schema-driven form and the raw-text JSON editor — read
//! and write through this crate so the two stay in agreement:
//!
//! ```text
//! form edit ──► set(content, "hero.title", v) ──┐
//!                                               ├──► identical JSON
//! text edit ──► parse / reserialize ────────────┘
//! ```
//!
//! The [`codec`] module handles the persistence boundary, where content
//! travels as a serialized string and malformed payloads degrade to `{}`
//! instead of failing the operation.

pub mod codec;
pub mod error;
pub mod model;
pub mod path;

pub use codec::{from_boundary_json, to_boundary_json};
pub use error::{ContentError, ContentResult};
pub use model::{get, get_mut, set};
pub use path::{parse_path, PathSegment};
