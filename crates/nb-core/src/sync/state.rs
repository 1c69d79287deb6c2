use serde::{Deserialize, Serialize};

/// Notice synchronization state machine
///
/// Design principle: this is a pure type state machine with only state
/// definitions and transition validation logic. Timers, generation
/// counters and channel plumbing live in the application layer (nb-app).
///
/// State transitions:
///
/// ```text
/// Idle
///  │
///  ├─ timer tick ──→ Polling ── read resolves ──→ Reconciling ──→ Idle
///  │
///  └─ local mutation ──→ Pushing ──→ Idle
///
/// Polling / Reconciling / Pushing ── offline ──→ Suspended ── online ──→ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncState {
    /// No sync operation in progress
    Idle,

    /// Waiting for the remote document read to resolve
    Polling,

    /// Comparing the remote collection against the local one
    Reconciling,

    /// Writing the full local collection to the remote store
    Pushing,

    /// Offline; remote operations are gated off until reconnection
    Suspended,
}

impl SyncState {
    /// Check if a remote operation is currently in flight
    pub fn is_active(self) -> bool {
        matches!(self, Self::Polling | Self::Reconciling | Self::Pushing)
    }

    pub fn is_suspended(self) -> bool {
        self == Self::Suspended
    }

    /// Timer tick: only an idle engine starts a poll. A tick landing
    /// while a previous cycle is still in flight is skipped.
    pub fn start_polling(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Polling),
            _ => None,
        }
    }

    /// Transition once the remote read has resolved
    pub fn on_remote_read(self) -> Option<Self> {
        match self {
            Self::Polling => Some(Self::Reconciling),
            _ => None,
        }
    }

    /// Transition after reconciliation finished (with or without a
    /// local overwrite)
    pub fn on_reconciled(self) -> Self {
        match self {
            Self::Reconciling => Self::Idle,
            _ => self,
        }
    }

    /// Local mutation requests propagation
    pub fn start_pushing(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Pushing),
            _ => None,
        }
    }

    /// Transition after the push resolved, successfully or not
    pub fn on_pushed(self) -> Self {
        match self {
            Self::Pushing => Self::Idle,
            _ => self,
        }
    }

    /// Connectivity dropped: every state suspends, abandoning in-flight
    /// work
    pub fn on_offline(self) -> Self {
        Self::Suspended
    }

    /// Connectivity restored: the next timer tick resumes polling
    pub fn on_online(self) -> Self {
        match self {
            Self::Suspended => Self::Idle,
            _ => self,
        }
    }
}
