//! Remote JSON-document store adapter.

pub mod envelope;
pub mod http_store;

pub use http_store::HttpRemoteStore;
