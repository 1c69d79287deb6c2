//! Sync layer configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One remote JSON-document endpoint.
///
/// Read and write may use different URLs: JSONBin-style services expose
/// the document at `…/latest` for reads while writes PUT to the bin
/// root. Services with a single URL use [`RemoteEndpoint::single`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEndpoint {
    pub read_url: String,
    pub write_url: String,
}

impl RemoteEndpoint {
    /// Endpoint where reads and writes share one URL.
    pub fn single(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            write_url: url.clone(),
            read_url: url,
        }
    }

    /// Endpoint with distinct read and write URLs.
    pub fn split(read_url: impl Into<String>, write_url: impl Into<String>) -> Self {
        Self {
            read_url: read_url.into(),
            write_url: write_url.into(),
        }
    }
}

/// Tuning knobs for the sync layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Fixed interval between reconciliation cycles.
    pub poll_interval: Duration,

    /// Total request attempts across all endpoints before a remote
    /// operation surfaces failure.
    pub max_attempts: usize,

    /// Seed an empty remote document with the bootstrap notices.
    pub seed_on_empty: bool,

    /// Primary endpoint followed by ordered fallbacks, tried round-robin
    /// with wrapping on request failure.
    pub endpoints: Vec<RemoteEndpoint>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            max_attempts: 3,
            seed_on_empty: true,
            endpoints: Vec::new(),
        }
    }
}
