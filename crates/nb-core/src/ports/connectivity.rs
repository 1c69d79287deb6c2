use tokio::sync::watch;

/// Tracks transport-level online/offline transitions.
///
/// Event-driven: the embedding shell pushes transitions in, nothing here
/// polls. The sync engine and the remote store consult it to short-circuit
/// doomed network calls while offline.
pub trait ConnectivityPort: Send + Sync {
    /// Current connectivity state.
    fn is_online(&self) -> bool;

    /// Subscribe to connectivity transitions.
    ///
    /// The receiver holds the current state and is notified on every
    /// transition afterwards.
    fn subscribe(&self) -> watch::Receiver<bool>;
}
