//! On-device persistence: the notice document file and the session
//! identity key.

pub mod file_store;
pub mod session;

pub use file_store::FileNoticeStore;
pub use session::SessionFileStore;
