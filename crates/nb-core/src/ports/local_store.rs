use async_trait::async_trait;

use crate::errors::StorageError;
use crate::notice::Notice;

/// Durable on-device persistence of the whole notice collection.
///
/// The collection is one JSON-encoded array under a well-known key; every
/// save replaces it wholesale. Persistence survives process restarts.
#[async_trait]
pub trait LocalStorePort: Send + Sync {
    /// Load the persisted collection.
    ///
    /// Absent or corrupt payloads fail closed to an empty collection so a
    /// damaged store can never brick start-up. This never errors.
    async fn load(&self) -> Vec<Notice>;

    /// Replace the persisted collection atomically.
    ///
    /// Failure is non-fatal: the in-memory collection stays authoritative
    /// for the session and the caller reports degradation out of band.
    async fn save(&self, notices: &[Notice]) -> Result<(), StorageError>;
}
