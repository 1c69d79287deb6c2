#![allow(dead_code)]

//! Hand-rolled in-memory port implementations shared by the
//! integration tests.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use nb_app::NoticeRepositoryDeps;
use nb_core::config::SyncConfig;
use nb_core::errors::StorageError;
use nb_core::notice::{Category, Notice, NoticeInput, Priority};
use nb_core::ports::{ClockPort, LocalStorePort, RemoteStoreError, RemoteStorePort};
use nb_core::session::ClientId;
use nb_infra::ConnectivityMonitor;

pub struct MemoryLocalStore {
    notices: Mutex<Vec<Notice>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::with_notices(Vec::new())
    }

    pub fn with_notices(notices: Vec<Notice>) -> Self {
        Self {
            notices: Mutex::new(notices),
            saves: AtomicUsize::new(0),
            fail_saves: AtomicBool::new(false),
        }
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn saved(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

#[async_trait]
impl LocalStorePort for MemoryLocalStore {
    async fn load(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    async fn save(&self, notices: &[Notice]) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError("quota exceeded".to_string()));
        }
        *self.notices.lock().unwrap() = notices.to_vec();
        Ok(())
    }
}

pub struct MemoryRemoteStore {
    document: Mutex<Vec<Notice>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
    connectivity: Option<Arc<ConnectivityMonitor>>,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::with_document(Vec::new())
    }

    pub fn with_document(document: Vec<Notice>) -> Self {
        Self {
            document: Mutex::new(document),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
            connectivity: None,
        }
    }

    /// Short-circuit with [`RemoteStoreError::Offline`] while the given
    /// monitor reports offline, like the HTTP adapter does.
    pub fn respecting_connectivity(mut self, monitor: Arc<ConnectivityMonitor>) -> Self {
        self.connectivity = Some(monitor);
        self
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn document(&self) -> Vec<Notice> {
        self.document.lock().unwrap().clone()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), RemoteStoreError> {
        use nb_core::ports::ConnectivityPort;
        match &self.connectivity {
            Some(monitor) if !monitor.is_online() => Err(RemoteStoreError::Offline),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteStorePort for MemoryRemoteStore {
    async fn read(&self) -> Result<Vec<Notice>, RemoteStoreError> {
        self.check_online()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.document.lock().unwrap().clone())
    }

    async fn write(&self, notices: &[Notice]) -> Result<(), RemoteStoreError> {
        self.check_online()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RemoteStoreError::Exhausted {
                attempts: 3,
                last_error: "503 Service Unavailable".to_string(),
            });
        }
        *self.document.lock().unwrap() = notices.to_vec();
        Ok(())
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Advances one second per call so consecutive `created_at` stamps are
/// strictly increasing.
pub struct TickingClock {
    base: DateTime<Utc>,
    calls: AtomicI64,
}

impl TickingClock {
    pub fn new() -> Self {
        Self {
            base: fixed_instant(),
            calls: AtomicI64::new(0),
        }
    }
}

impl ClockPort for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        self.base + Duration::seconds(self.calls.fetch_add(1, Ordering::SeqCst))
    }
}

pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn deps(
    local: Arc<MemoryLocalStore>,
    remote: Arc<MemoryRemoteStore>,
    monitor: Arc<ConnectivityMonitor>,
    clock: Arc<dyn ClockPort>,
) -> NoticeRepositoryDeps {
    NoticeRepositoryDeps {
        local,
        remote,
        connectivity: monitor,
        clock,
        client_id: ClientId::from("user_test".to_string()),
        config: SyncConfig {
            seed_on_empty: false,
            ..SyncConfig::default()
        },
    }
}

pub fn sample_input(title: &str, content: &str) -> NoticeInput {
    NoticeInput {
        title: title.to_string(),
        content: content.to_string(),
        category: Category::General,
        priority: Priority::Medium,
        author: Some("tester".to_string()),
    }
}

pub fn sample_notice(id: &str, title: &str, created_at: DateTime<Utc>) -> Notice {
    Notice {
        id: id.to_string(),
        title: title.to_string(),
        content: format!("{title} body"),
        category: Category::General,
        priority: Priority::Low,
        created_at,
        updated_at: None,
        author: Some("tester".to_string()),
        modified_by: None,
    }
}

/// Let background propagation tasks run to completion on the
/// current-thread test runtime.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
