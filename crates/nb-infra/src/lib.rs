//! # nb-infra
//!
//! Infrastructure adapters for the shared notice board: file-backed
//! local persistence, the HTTP remote store with endpoint failover, the
//! event-driven connectivity monitor and the system clock.

pub mod clock;
pub mod connectivity;
pub mod remote;
pub mod store;

pub use clock::SystemClock;
pub use connectivity::ConnectivityMonitor;
pub use remote::HttpRemoteStore;
pub use store::{FileNoticeStore, SessionFileStore};
