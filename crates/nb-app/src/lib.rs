//! # nb-app
//!
//! Application layer of the shared notice board: the [`SyncEngine`]
//! orchestrating polling, reconciliation and push propagation, and the
//! [`NoticeRepository`] facade the UI layer talks to.
//!
//! The UI never reaches LocalStore, RemoteStore or the engine directly;
//! the repository is the sole seam.

pub mod engine;
pub mod repository;
pub mod state;

pub use engine::{SyncEngine, SyncEngineDeps, SyncEngineHandle};
pub use repository::{ImportOutcome, NoticeRepository, NoticeRepositoryDeps};
pub use state::BoardState;
