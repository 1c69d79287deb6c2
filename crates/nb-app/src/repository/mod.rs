//! The repository facade the UI layer talks to.
//!
//! Every mutation commits to the in-memory board and the local store
//! first, then propagates to the remote store in the background. Remote
//! failures never fail the mutation; they surface on the sync-health
//! channel.

use std::sync::Arc;

use nb_core::config::SyncConfig;
use nb_core::errors::RepositoryError;
use nb_core::notice::{
    parse_import_payload, sort_newest_first, ImportRecord, Notice, NoticeFilter, NoticeInput,
};
use nb_core::ports::{ClockPort, ConnectivityPort, LocalStorePort, RemoteStorePort};
use nb_core::session::ClientId;
use nb_core::sync::{SyncHealth, SyncState};
use tokio::sync::{broadcast, watch, Mutex};
use tracing::warn;
use uuid::Uuid;

use crate::engine::{SyncEngine, SyncEngineDeps, SyncEngineHandle};
use crate::state::BoardState;

/// Ports and configuration for building a [`NoticeRepository`].
pub struct NoticeRepositoryDeps {
    pub local: Arc<dyn LocalStorePort>,
    pub remote: Arc<dyn RemoteStorePort>,
    pub connectivity: Arc<dyn ConnectivityPort>,
    pub clock: Arc<dyn ClockPort>,
    pub client_id: ClientId,
    pub config: SyncConfig,
}

/// Result of an import batch. Records are accepted independently; one
/// malformed record never aborts the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    pub accepted: usize,
    pub rejected: usize,
}

/// Facade over the board, the local store and the sync engine.
///
/// Reads are served from memory. Mutations commit locally and return;
/// remote propagation runs in the background.
pub struct NoticeRepository {
    board: Arc<BoardState>,
    local: Arc<dyn LocalStorePort>,
    clock: Arc<dyn ClockPort>,
    client_id: ClientId,
    engine: Arc<SyncEngine>,
    handle: Mutex<Option<SyncEngineHandle>>,
}

impl NoticeRepository {
    pub fn new(deps: NoticeRepositoryDeps) -> Self {
        let board = Arc::new(BoardState::new());
        let engine = Arc::new(SyncEngine::new(
            SyncEngineDeps {
                board: Arc::clone(&board),
                local: Arc::clone(&deps.local),
                remote: deps.remote,
                connectivity: deps.connectivity,
                clock: Arc::clone(&deps.clock),
            },
            deps.config,
        ));
        Self {
            board,
            local: deps.local,
            clock: deps.clock,
            client_id: deps.client_id,
            engine,
            handle: Mutex::new(None),
        }
    }

    /// Load local state, reconcile with the remote store once and start
    /// the periodic sync task. Calling it again restarts the task.
    pub async fn init(&self) {
        self.engine.initialize().await;
        let handle = Arc::clone(&self.engine).spawn();
        if let Some(previous) = self.handle.lock().await.replace(handle) {
            previous.dispose();
        }
    }

    /// Stop the periodic sync task. Idempotent.
    pub async fn dispose(&self) {
        if let Some(handle) = self.handle.lock().await.take() {
            handle.dispose();
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Current collection, filtered and ordered newest-first.
    pub async fn list(&self, filter: &NoticeFilter) -> Vec<Notice> {
        let mut notices = self.board.snapshot().await;
        notices.retain(|notice| filter.matches(notice));
        sort_newest_first(&mut notices);
        notices
    }

    pub async fn create(&self, input: NoticeInput) -> Result<Notice, RepositoryError> {
        input.validate()?;
        let notice = Notice {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            content: input.content,
            category: input.category,
            priority: input.priority,
            created_at: self.clock.now(),
            updated_at: None,
            author: input.author,
            modified_by: None,
        };
        let snapshot = self
            .board
            .mutate(|notices| {
                notices.insert(0, notice.clone());
                notices.clone()
            })
            .await;
        self.persist_and_propagate(snapshot).await;
        Ok(notice)
    }

    pub async fn update(&self, id: &str, input: NoticeInput) -> Result<Notice, RepositoryError> {
        input.validate()?;
        let now = self.clock.now();
        let client_id = self.client_id.clone();
        let updated = self
            .board
            .mutate(move |notices| {
                let slot = notices.iter_mut().find(|n| n.id == id)?;
                slot.title = input.title;
                slot.content = input.content;
                slot.category = input.category;
                slot.priority = input.priority;
                if input.author.is_some() {
                    slot.author = input.author;
                }
                slot.updated_at = Some(now);
                slot.modified_by = Some(client_id.to_string());
                Some((slot.clone(), notices.clone()))
            })
            .await;
        let Some((notice, snapshot)) = updated else {
            return Err(RepositoryError::NotFound { id: id.to_string() });
        };
        self.persist_and_propagate(snapshot).await;
        Ok(notice)
    }

    pub async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let (removed, snapshot) = self
            .board
            .mutate(|notices| {
                let before = notices.len();
                notices.retain(|n| n.id != id);
                (notices.len() != before, notices.clone())
            })
            .await;
        if !removed {
            return Err(RepositoryError::NotFound { id: id.to_string() });
        }
        self.persist_and_propagate(snapshot).await;
        Ok(())
    }

    /// Import a JSON array of notice records.
    ///
    /// The payload must parse as an array; anything else fails the whole
    /// batch. Individual records are validated independently, accepted
    /// ones get fresh ids (their `createdAt` is kept when present) and
    /// land in a single propagation.
    pub async fn import_batch(&self, payload: &str) -> Result<ImportOutcome, RepositoryError> {
        let raw_records = parse_import_payload(payload)?;
        let now = self.clock.now();
        let mut accepted = Vec::new();
        let mut rejected = 0usize;
        for value in &raw_records {
            match ImportRecord::from_value(value) {
                Ok(record) => accepted.push(Notice {
                    id: Uuid::new_v4().to_string(),
                    title: record.title,
                    content: record.content,
                    category: record.category,
                    priority: record.priority,
                    created_at: record.created_at.unwrap_or(now),
                    updated_at: None,
                    author: record.author,
                    modified_by: None,
                }),
                Err(e) => {
                    warn!(error = %e, "skipping malformed import record");
                    rejected += 1;
                }
            }
        }

        let outcome = ImportOutcome {
            accepted: accepted.len(),
            rejected,
        };
        if !accepted.is_empty() {
            let snapshot = self
                .board
                .mutate(move |notices| {
                    notices.extend(accepted);
                    notices.clone()
                })
                .await;
            self.persist_and_propagate(snapshot).await;
        }
        Ok(outcome)
    }

    /// Serialize the current collection for download, newest-first.
    pub async fn export_snapshot(&self) -> String {
        let mut notices = self.board.snapshot().await;
        sort_newest_first(&mut notices);
        serde_json::to_string_pretty(&notices).unwrap_or_else(|_| "[]".to_string())
    }

    /// Suggested file name for an export taken now.
    pub fn export_file_name(&self) -> String {
        format!("notices_{}.json", self.clock.now().format("%Y-%m-%d"))
    }

    /// Collection-change notifications from reconciliation.
    pub fn subscribe(&self) -> broadcast::Receiver<Vec<Notice>> {
        self.engine.subscribe_changes()
    }

    pub fn sync_health(&self) -> watch::Receiver<SyncHealth> {
        self.engine.sync_health()
    }

    pub fn sync_state(&self) -> watch::Receiver<SyncState> {
        self.engine.watch_state()
    }

    /// Commit a snapshot locally and kick off background propagation.
    ///
    /// A failed local save is tolerated: the in-memory board stays
    /// authoritative for the session and the degradation shows up on the
    /// health channel.
    async fn persist_and_propagate(&self, snapshot: Vec<Notice>) {
        if let Err(e) = self.local.save(&snapshot).await {
            warn!(error = %e, "saving collection locally failed, in-memory state stays authoritative");
            self.engine.note_storage_failure();
        }
        let engine = Arc::clone(&self.engine);
        tokio::spawn(async move { engine.propagate_collection(snapshot).await });
    }
}
