use async_trait::async_trait;
use thiserror::Error;

use crate::notice::Notice;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteStoreError {
    /// Attempted a remote operation while the connectivity monitor
    /// reports offline. No network call was made.
    #[error("offline: remote operation skipped")]
    Offline,

    /// Every configured endpoint failed within the retry ceiling.
    #[error("all remote endpoints failed after {attempts} attempts: {last_error}")]
    Exhausted { attempts: usize, last_error: String },
}

/// Adapter over a hosted JSON-document endpoint with whole-document
/// read/write semantics.
///
/// The backing services expose no per-record API, so `write` always
/// carries the complete collection and conflicts resolve last-writer-wins
/// at document granularity.
#[async_trait]
pub trait RemoteStorePort: Send + Sync {
    /// Fetch the complete remote collection.
    async fn read(&self) -> Result<Vec<Notice>, RemoteStoreError>;

    /// Replace the complete remote collection.
    async fn write(&self, notices: &[Notice]) -> Result<(), RemoteStoreError>;
}
