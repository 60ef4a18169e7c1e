//! Storage backend trait definition.
//!
//! The `RecordStorage` trait is the persistence seam of the journal. A
//! backend only moves one opaque document (the serialized record array) in
//! and out; parsing and validation stay in the journal.

use crate::error::Result;

/// A single-document persistence backend.
///
/// Implementations must ensure:
/// - `write` replaces the whole document (no appends or partial updates)
/// - A failed `write` leaves the previous document readable
/// - `read` after a successful `write` returns exactly what was written
pub trait RecordStorage {
    /// Read the persisted document.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns `MoodlogError::Storage` if the document exists but cannot be read.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the persisted document.
    ///
    /// # Errors
    ///
    /// Returns `MoodlogError::Storage` if the document cannot be written.
    fn write(&mut self, document: &str) -> Result<()>;

    /// Human-readable location of the document, for messages.
    fn location(&self) -> String;
}
