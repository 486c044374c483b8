//! moodminder-storage
//!
//! Assessment history on the local filesystem. One JSON document per
//! assessment, laid out by the key conventions in `moodminder_core::keys`.

pub mod error;
pub mod history;
pub mod objects;

pub use history::HistoryStore;
