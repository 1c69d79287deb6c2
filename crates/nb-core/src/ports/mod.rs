//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (the sync
//! engine and the notice repository) and infrastructure implementations,
//! following Hexagonal Architecture: the core stays independent of the
//! filesystem, the HTTP client and the embedding shell.

pub mod clock;
pub mod connectivity;
pub mod local_store;
pub mod remote_store;

pub use clock::ClockPort;
pub use connectivity::ConnectivityPort;
pub use local_store::LocalStorePort;
pub use remote_store::{RemoteStoreError, RemoteStorePort};
