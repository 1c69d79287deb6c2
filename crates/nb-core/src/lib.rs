//! # nb-core
//!
//! Core domain models and business logic for the shared notice board.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: the notice model and its validation rules, the sync
//! state machine, the port traits implemented by `nb-infra`, the error
//! taxonomy and the sync configuration types.

// Public module exports
pub mod config;
pub mod errors;
pub mod notice;
pub mod ports;
pub mod session;
pub mod sync;

// Re-export commonly used types at the crate root
pub use config::{RemoteEndpoint, SyncConfig};
pub use errors::{RepositoryError, StorageError, ValidationError};
pub use notice::{Category, Notice, NoticeFilter, NoticeInput, Priority};
pub use session::ClientId;
pub use sync::{SyncHealth, SyncState};
