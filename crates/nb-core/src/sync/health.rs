use serde::{Deserialize, Serialize};

/// Side-channel sync status for the UI.
///
/// Mutation results never carry remote failures: a caller who got `Ok`
/// from create/update/delete keeps its committed local change, and the
/// degraded propagation is reported here instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncHealth {
    /// Last remote exchange succeeded; local and remote converge.
    Synced,

    /// Online, but the last remote operation failed. Changes are saved
    /// locally and will be re-pushed on the next cycle.
    Degraded,

    /// Offline. Changes are saved locally only until reconnection.
    Offline,
}

impl SyncHealth {
    /// True when local changes are not known to have reached the remote
    /// store ("saved locally, not shared").
    pub fn is_local_only(self) -> bool {
        matches!(self, Self::Degraded | Self::Offline)
    }
}
