use nb_core::ports::ConnectivityPort;
use tokio::sync::watch;
use tracing::info;

/// Event-driven connectivity state shared by the sync engine and the
/// remote store.
///
/// The embedding shell forwards transport online/offline signals through
/// [`ConnectivityMonitor::set_online`]; nothing here polls. Subscribers
/// see each transition exactly once.
pub struct ConnectivityMonitor {
    tx: watch::Sender<bool>,
}

impl ConnectivityMonitor {
    pub fn new(initially_online: bool) -> Self {
        let (tx, _rx) = watch::channel(initially_online);
        Self { tx }
    }

    /// Record a transport transition. Duplicate signals do not wake
    /// subscribers.
    pub fn set_online(&self, online: bool) {
        let changed = self.tx.send_if_modified(|state| {
            if *state == online {
                false
            } else {
                *state = online;
                true
            }
        });
        if changed {
            info!(online, "connectivity changed");
        }
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConnectivityPort for ConnectivityMonitor {
    fn is_online(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}
