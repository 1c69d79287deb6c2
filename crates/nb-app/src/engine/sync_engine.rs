use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use nb_core::config::SyncConfig;
use nb_core::notice::Notice;
use nb_core::ports::{ClockPort, ConnectivityPort, LocalStorePort, RemoteStoreError, RemoteStorePort};
use nb_core::sync::{SyncHealth, SyncState};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::engine::seed;
use crate::state::BoardState;

/// Capacity of the change-notification channel. A slow subscriber only
/// loses intermediate snapshots, never the latest one.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Dependency grouping for [`SyncEngine`] construction. Just parameter
/// packing, no defaults and no hidden logic.
pub struct SyncEngineDeps {
    pub board: Arc<BoardState>,
    pub local: Arc<dyn LocalStorePort>,
    pub remote: Arc<dyn RemoteStorePort>,
    pub connectivity: Arc<dyn ConnectivityPort>,
    pub clock: Arc<dyn ClockPort>,
}

/// Orchestrates the polling loop, whole-collection reconciliation,
/// push propagation, bootstrap seeding and offline suspension.
///
/// Conflict policy is last-writer-wins at whole-collection granularity:
/// if two sessions mutate between poll cycles the last successful write
/// silently supersedes the other, and the losing session adopts the
/// winner on its next poll. This is a known consistency weakness of the
/// whole-document backing stores, not a bug.
///
/// In-flight remote operations are tagged with a generation counter;
/// going offline bumps the generation so stale results are discarded
/// when they eventually resolve.
pub struct SyncEngine {
    board: Arc<BoardState>,
    local: Arc<dyn LocalStorePort>,
    remote: Arc<dyn RemoteStorePort>,
    connectivity: Arc<dyn ConnectivityPort>,
    clock: Arc<dyn ClockPort>,
    config: SyncConfig,
    state_tx: watch::Sender<SyncState>,
    health_tx: watch::Sender<SyncHealth>,
    changes_tx: broadcast::Sender<Vec<Notice>>,
    generation: AtomicU64,
    /// Set while the local collection has changes the remote store has
    /// not confirmed; the next cycle pushes instead of polling so
    /// offline edits are not clobbered by the first poll after
    /// reconnection.
    dirty: AtomicBool,
}

impl SyncEngine {
    pub fn new(deps: SyncEngineDeps, config: SyncConfig) -> Self {
        let initial_health = if deps.connectivity.is_online() {
            SyncHealth::Synced
        } else {
            SyncHealth::Offline
        };
        let (state_tx, _) = watch::channel(SyncState::Idle);
        let (health_tx, _) = watch::channel(initial_health);
        let (changes_tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);

        Self {
            board: deps.board,
            local: deps.local,
            remote: deps.remote,
            connectivity: deps.connectivity,
            clock: deps.clock,
            config,
            state_tx,
            health_tx,
            changes_tx,
            generation: AtomicU64::new(0),
            dirty: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> SyncState {
        *self.state_tx.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<SyncState> {
        self.state_tx.subscribe()
    }

    pub fn sync_health(&self) -> watch::Receiver<SyncHealth> {
        self.health_tx.subscribe()
    }

    /// Subscribe to reconciliation change notifications. Each message is
    /// the full collection adopted from the remote store.
    pub fn subscribe_changes(&self) -> broadcast::Receiver<Vec<Notice>> {
        self.changes_tx.subscribe()
    }

    /// Load the local collection into the board, then reconcile with the
    /// remote store once (seeding an empty board when configured).
    pub async fn initialize(&self) {
        let local_notices = self.local.load().await;
        info!(count = local_notices.len(), "loaded local notice collection");
        self.board.replace(local_notices).await;
        self.ensure_initialized().await;
    }

    /// One-shot start-up reconciliation.
    ///
    /// Seeding only happens when both the remote document and the local
    /// board are empty, which keeps it idempotent under concurrent
    /// first-time access: a second caller reads a non-empty remote and
    /// skips the seed.
    pub async fn ensure_initialized(&self) {
        match self.remote.read().await {
            Ok(remote_notices) if remote_notices.is_empty() => {
                let local_notices = self.board.snapshot().await;
                if local_notices.is_empty() {
                    if self.config.seed_on_empty {
                        info!("board empty everywhere, seeding bootstrap notices");
                        let seeded = seed::bootstrap_notices(self.clock.as_ref());
                        self.adopt(seeded.clone()).await;
                        self.propagate_collection(seeded).await;
                    } else {
                        self.set_health(SyncHealth::Synced);
                    }
                } else {
                    // remote wiped or never written; our copy is the
                    // freshest one
                    self.propagate_collection(local_notices).await;
                }
            }
            Ok(remote_notices) => {
                let local_notices = self.board.snapshot().await;
                if remote_notices != local_notices {
                    info!(
                        remote = remote_notices.len(),
                        local = local_notices.len(),
                        "adopting remote collection at start-up"
                    );
                    self.adopt(remote_notices).await;
                }
                self.set_health(SyncHealth::Synced);
            }
            Err(RemoteStoreError::Offline) => {
                debug!("offline at start-up, serving the local collection");
                self.note_offline();
            }
            Err(e) => {
                warn!(error = %e, "remote unreachable at start-up, serving the local collection");
                self.set_health(SyncHealth::Degraded);
            }
        }
    }

    /// Start the periodic sync task. Tear it down through the returned
    /// handle so no timer outlives the board.
    pub fn spawn(self: Arc<Self>) -> SyncEngineHandle {
        let mut connectivity_rx = self.connectivity.subscribe();
        let poll_interval = self.config.poll_interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => self.run_cycle().await,
                    changed = connectivity_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let online = *connectivity_rx.borrow_and_update();
                        self.on_connectivity(online);
                    }
                }
            }
        });

        SyncEngineHandle { task }
    }

    /// One timer tick: suspended while offline, push when local changes
    /// are pending, poll otherwise.
    pub async fn run_cycle(&self) {
        if !self.connectivity.is_online() {
            self.note_offline();
            return;
        }
        // self-heal if the reconnection event has not been processed yet
        self.set_state(self.state().on_online());

        if self.dirty.load(Ordering::SeqCst) {
            let snapshot = self.board.snapshot().await;
            self.propagate_collection(snapshot).await;
            return;
        }
        self.poll_once().await;
    }

    /// Propagate a collection snapshot to the remote store.
    ///
    /// The snapshot is already committed locally; failure here never
    /// rolls it back and is reported on the health channel only.
    pub async fn propagate_collection(&self, notices: Vec<Notice>) {
        // mark before the attempt so a failure leaves the flag set
        self.dirty.store(true, Ordering::SeqCst);
        let generation = self.generation.load(Ordering::SeqCst);
        if let Some(next) = self.state().start_pushing() {
            self.set_state(next);
        }

        let result = self.remote.write(&notices).await;

        if self.is_stale(generation) {
            // connectivity dropped mid-push; the outcome is stale and the
            // dirty flag keeps the collection queued for after reconnection
            debug!("discarding stale push outcome");
            self.note_offline();
            return;
        }

        match result {
            Ok(()) => {
                self.dirty.store(false, Ordering::SeqCst);
                self.set_health(SyncHealth::Synced);
                info!(count = notices.len(), "collection propagated to remote store");
            }
            Err(RemoteStoreError::Offline) => {
                debug!("offline, collection saved locally only");
                self.note_offline();
            }
            Err(e) => {
                warn!(error = %e, "push failed, collection saved locally only");
                self.set_health(SyncHealth::Degraded);
            }
        }
        self.set_state(self.state().on_pushed());
    }

    async fn poll_once(&self) {
        let Some(next) = self.state().start_polling() else {
            // previous cycle still in flight; skip this tick
            return;
        };
        self.set_state(next);
        let generation = self.generation.load(Ordering::SeqCst);

        let result = self.remote.read().await;

        if self.is_stale(generation) {
            debug!("discarding stale poll result");
            self.note_offline();
            return;
        }

        match result {
            Ok(remote_notices) => {
                if let Some(next) = self.state().on_remote_read() {
                    self.set_state(next);
                }
                let local_notices = self.board.snapshot().await;
                if remote_notices != local_notices {
                    info!(
                        remote = remote_notices.len(),
                        local = local_notices.len(),
                        "remote document differs, adopting remote collection"
                    );
                    self.adopt(remote_notices).await;
                }
                self.set_health(SyncHealth::Synced);
                self.set_state(self.state().on_reconciled());
            }
            Err(RemoteStoreError::Offline) => self.note_offline(),
            Err(e) => {
                warn!(error = %e, "poll failed");
                self.set_health(SyncHealth::Degraded);
                self.set_state(SyncState::Idle);
            }
        }
    }

    /// Overwrite the board and the local store with `notices` and notify
    /// subscribers. Whole-collection adoption, never a per-field merge.
    async fn adopt(&self, notices: Vec<Notice>) {
        self.board.replace(notices.clone()).await;
        if let Err(e) = self.local.save(&notices).await {
            warn!(error = %e, "persisting adopted collection failed, in-memory state stays authoritative");
        }
        let _ = self.changes_tx.send(notices);
    }

    /// True when the operation that captured `generation` was overtaken
    /// by an offline transition.
    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation || !self.connectivity.is_online()
    }

    fn on_connectivity(&self, online: bool) {
        if online {
            self.set_state(self.state().on_online());
            if self.dirty.load(Ordering::SeqCst) {
                self.set_health(SyncHealth::Degraded);
            }
            info!("connectivity restored, resuming sync on the next tick");
        } else {
            self.note_offline();
        }
    }

    fn note_offline(&self) {
        let state = self.state();
        if !state.is_suspended() {
            // abandon in-flight work; stale generations discard their
            // results when they resolve
            self.generation.fetch_add(1, Ordering::SeqCst);
            self.set_state(state.on_offline());
            self.set_health(SyncHealth::Offline);
            info!("connectivity lost, suspending sync");
        }
    }

    pub(crate) fn note_storage_failure(&self) {
        self.set_health(SyncHealth::Degraded);
    }

    fn set_state(&self, next: SyncState) {
        self.state_tx.send_if_modified(|state| {
            if *state == next {
                false
            } else {
                *state = next;
                true
            }
        });
    }

    fn set_health(&self, next: SyncHealth) {
        self.health_tx.send_if_modified(|health| {
            if *health == next {
                false
            } else {
                *health = next;
                true
            }
        });
    }
}

/// Owns the periodic sync task.
pub struct SyncEngineHandle {
    task: JoinHandle<()>,
}

impl SyncEngineHandle {
    /// Cancel the periodic task; no timer survives teardown.
    pub fn dispose(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
