use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use nb_core::config::{RemoteEndpoint, SyncConfig};
use nb_core::notice::Notice;
use nb_core::ports::{ConnectivityPort, RemoteStoreError, RemoteStorePort};
use tracing::{debug, warn};

use crate::remote::envelope::notices_from_envelope;

/// HTTP adapter over the hosted JSON-document services.
///
/// Holds a primary endpoint plus ordered fallbacks. A request failure
/// (non-2xx, transport error, malformed body) advances to the next
/// endpoint round-robin with wrapping; a success pins the cursor to the
/// endpoint that worked. After `max_attempts` total failures the
/// operation surfaces [`RemoteStoreError::Exhausted`].
///
/// Both operations fail immediately with [`RemoteStoreError::Offline`]
/// while the connectivity monitor reports offline, without touching the
/// network.
pub struct HttpRemoteStore {
    client: reqwest::Client,
    endpoints: Vec<RemoteEndpoint>,
    max_attempts: usize,
    cursor: AtomicUsize,
    connectivity: Arc<dyn ConnectivityPort>,
}

impl HttpRemoteStore {
    pub fn new(
        endpoints: Vec<RemoteEndpoint>,
        max_attempts: usize,
        connectivity: Arc<dyn ConnectivityPort>,
    ) -> Result<Self> {
        if endpoints.is_empty() {
            return Err(anyhow!("at least one remote endpoint is required"));
        }
        if max_attempts == 0 {
            return Err(anyhow!("retry ceiling must allow at least one attempt"));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            endpoints,
            max_attempts,
            cursor: AtomicUsize::new(0),
            connectivity,
        })
    }

    pub fn from_config(config: &SyncConfig, connectivity: Arc<dyn ConnectivityPort>) -> Result<Self> {
        Self::new(config.endpoints.clone(), config.max_attempts, connectivity)
    }

    fn current_endpoint(&self) -> &RemoteEndpoint {
        let index = self.cursor.load(Ordering::Relaxed) % self.endpoints.len();
        &self.endpoints[index]
    }

    /// Advance to the next fallback, wrapping past the end.
    fn advance_endpoint(&self) {
        self.cursor.fetch_add(1, Ordering::Relaxed);
    }

    async fn try_read(&self, endpoint: &RemoteEndpoint) -> Result<Vec<Notice>> {
        let response = self
            .client
            .get(&endpoint.read_url)
            .send()
            .await
            .context("request failed")?
            .error_for_status()
            .context("non-success status")?;

        let body: serde_json::Value = response.json().await.context("malformed response body")?;
        Ok(notices_from_envelope(body))
    }

    async fn try_write(&self, endpoint: &RemoteEndpoint, notices: &[Notice]) -> Result<()> {
        self.client
            .put(&endpoint.write_url)
            .json(notices)
            .send()
            .await
            .context("request failed")?
            .error_for_status()
            .context("non-success status")?;
        Ok(())
    }
}

#[async_trait]
impl RemoteStorePort for HttpRemoteStore {
    async fn read(&self) -> Result<Vec<Notice>, RemoteStoreError> {
        if !self.connectivity.is_online() {
            return Err(RemoteStoreError::Offline);
        }

        let mut last_error = String::new();
        for attempt in 1..=self.max_attempts {
            let endpoint = self.current_endpoint().clone();
            match self.try_read(&endpoint).await {
                Ok(notices) => {
                    debug!(count = notices.len(), url = %endpoint.read_url, "remote read ok");
                    return Ok(notices);
                }
                Err(e) => {
                    warn!(attempt, url = %endpoint.read_url, error = %e, "remote read failed, advancing endpoint");
                    last_error = format!("{e:#}");
                    self.advance_endpoint();
                }
            }
        }

        Err(RemoteStoreError::Exhausted {
            attempts: self.max_attempts,
            last_error,
        })
    }

    async fn write(&self, notices: &[Notice]) -> Result<(), RemoteStoreError> {
        if !self.connectivity.is_online() {
            return Err(RemoteStoreError::Offline);
        }

        let mut last_error = String::new();
        for attempt in 1..=self.max_attempts {
            let endpoint = self.current_endpoint().clone();
            match self.try_write(&endpoint, notices).await {
                Ok(()) => {
                    debug!(count = notices.len(), url = %endpoint.write_url, "remote write ok");
                    return Ok(());
                }
                Err(e) => {
                    warn!(attempt, url = %endpoint.write_url, error = %e, "remote write failed, advancing endpoint");
                    last_error = format!("{e:#}");
                    self.advance_endpoint();
                }
            }
        }

        Err(RemoteStoreError::Exhausted {
            attempts: self.max_attempts,
            last_error,
        })
    }
}
