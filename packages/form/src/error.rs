//! Error types for form edits

use pagecraft_content::ContentError;
use thiserror::Error;

/// Edit-boundary failures. These block the specific write and are surfaced
/// inline; they are never retried automatically.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Not a number: {0:?}")]
    NotANumber(String),

    #[error("Value {0:?} is not one of the allowed options")]
    InvalidOption(String),

    #[error("Index {index} out of bounds (length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Value at {0:?} is not a list")]
    NotAList(String),

    #[error("Content path error: {0}")]
    Content(#[from] ContentError),
}

pub type FormResult<T> = Result<T, FormError>;
