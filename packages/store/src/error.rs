//! Error taxonomy for the persistence boundary.
//!
//! The gateway returns typed outcomes, never raw transport errors. The one
//! contract that matters to callers: an order-index uniqueness violation is
//! `Conflict` and nothing else is, because `Conflict` alone triggers the
//! refetch-and-retry path. Every other variant is terminal for the attempt
//! that produced it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Per-page order-index uniqueness violation
    #[error("Order index conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    /// Payload could not be encoded or decoded at the boundary
    #[error("Codec error: {0}")]
    Codec(String),
}

impl StoreError {
    /// Whether this failure is the order-index uniqueness conflict that
    /// permits a bounded refetch-and-retry.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_conflict_is_retryable() {
        assert!(StoreError::Conflict("order index 3".into()).is_conflict());
        assert!(!StoreError::NotFound("page 1".into()).is_conflict());
        assert!(!StoreError::Transport("connection reset".into()).is_conflict());
        assert!(!StoreError::Server {
            status: 500,
            message: "boom".into()
        }
        .is_conflict());
    }
}
