use nb_core::notice::Notice;
use tokio::sync::RwLock;

/// In-memory authoritative collection for the current session.
///
/// Local mutations land here and in the LocalStore before any remote
/// propagation starts, so a caller observing a successful mutation is
/// guaranteed the local state already reflects it. Reconciliation
/// overwrites it wholesale when the remote document differs.
#[derive(Default)]
pub struct BoardState {
    notices: RwLock<Vec<Notice>>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Vec<Notice> {
        self.notices.read().await.clone()
    }

    pub async fn replace(&self, notices: Vec<Notice>) {
        *self.notices.write().await = notices;
    }

    /// Apply a mutation under the write lock. The lock is never held
    /// across an await point.
    pub async fn mutate<T>(&self, f: impl FnOnce(&mut Vec<Notice>) -> T) -> T {
        let mut guard = self.notices.write().await;
        f(&mut guard)
    }
}
