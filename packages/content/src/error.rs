//! Error types for content access

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    #[error("Empty path")]
    EmptyPath,

    #[error("Empty key in path at segment {0}")]
    EmptyKey(usize),

    #[error("Invalid array index in path: {0}")]
    InvalidIndex(String),

    #[error("Unbalanced brackets in path segment: {0}")]
    UnbalancedBrackets(String),
}

pub type ContentResult<T> = Result<T, ContentError>;
