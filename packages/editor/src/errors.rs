//! Error types for the editor

use pagecraft_content::ContentError;
use pagecraft_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    /// Local validation failure; blocks the specific action, surfaced
    /// inline, never retried automatically
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Component index {index} out of bounds (page has {len})")]
    OutOfBounds { index: usize, len: usize },

    /// The bounded create loop ran out of attempts on order-index conflicts
    #[error("Create failed after {attempts} attempts (order index conflict)")]
    CreateExhausted { attempts: u32 },

    #[error("Page is not persisted yet")]
    PageNotPersisted,

    #[error("Page is already persisted")]
    PageAlreadyPersisted,
}

pub type EditorResult<T> = Result<T, EditorError>;
