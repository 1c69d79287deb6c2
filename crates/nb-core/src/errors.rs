//! Error taxonomy for the notice board.
//!
//! Validation and not-found failures surface synchronously at the
//! repository boundary. Remote connectivity and storage failures on the
//! propagation path never do; they travel over the sync-health side
//! channel instead, because the caller's local mutation has already
//! committed.

use thiserror::Error;

/// Rejected input at the repository boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    MissingTitle,

    #[error("content must not be empty")]
    MissingContent,

    #[error("unparseable import payload: {0}")]
    MalformedPayload(String),

    #[error("malformed notice record: {0}")]
    MalformedRecord(String),
}

/// Local persistence failure (quota exceeded, serialization error).
///
/// Reads never produce this: corrupt local content fails closed to an
/// empty collection. A failed save leaves the in-memory collection
/// authoritative for the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("local storage error: {0}")]
pub struct StorageError(pub String);

/// Errors surfaced synchronously by the notice repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("notice not found: {id}")]
    NotFound { id: String },
}
