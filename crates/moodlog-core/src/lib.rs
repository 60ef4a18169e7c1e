//! # Moodlog Core
//!
//! Core library for Moodlog - a local, CLI-first mood journal.
//!
//! This crate provides the record model, the in-memory store with undo
//! history, querying and statistics, and JSON persistence, independent of
//! the CLI interface.
//!
//! ## Architecture
//!
//! - **record**: Record model, creation builder and edit patches
//! - **store**: Ordered record store with identity resolution
//! - **history**: Bounded undo buffer of store snapshots
//! - **query**: Filtered, sorted views and search highlighting
//! - **stats**: Mean, mode, deviation and rating distribution
//! - **transfer**: Export and lenient import of JSON documents
//! - **storage**: Persistence backend trait and implementations
//! - **journal**: The owner tying store, history and storage together

pub mod error;
pub mod fs;
pub mod history;
pub mod journal;
pub mod query;
pub mod record;
pub mod stats;
pub mod storage;
pub mod store;
pub mod transfer;

pub use error::{MoodlogError, Result};
pub use journal::Journal;
pub use query::{Criteria, SortMode};
pub use record::{NewRecord, Record, RecordPatch, RecordRef};
pub use stats::Statistics;
pub use storage::{JsonFileStorage, MemoryStorage, RecordStorage};
pub use store::RecordStore;
pub use transfer::{ImportReport, TransferError};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
