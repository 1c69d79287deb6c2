//! Notice domain models: the persisted record, creation/edit input,
//! display filters and import-record validation.

pub mod filter;
pub mod import;
pub mod input;
pub mod model;

pub use filter::NoticeFilter;
pub use import::{parse_import_payload, ImportRecord};
pub use input::NoticeInput;
pub use model::{sort_newest_first, Category, Notice, Priority};
