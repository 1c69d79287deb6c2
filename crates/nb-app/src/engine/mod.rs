//! The sync engine: periodic polling, whole-collection reconciliation,
//! push propagation and offline suspension.

pub mod seed;
pub mod sync_engine;

pub use sync_engine::{SyncEngine, SyncEngineDeps, SyncEngineHandle};
