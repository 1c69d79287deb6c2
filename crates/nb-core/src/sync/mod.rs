//! Sync domain models and state machine.

pub mod health;
pub mod state;

pub use health::SyncHealth;
pub use state::SyncState;
