//! In-memory backend for tests and ephemeral sessions.

use super::traits::RecordStorage;
use crate::error::{MoodlogError, Result};

/// Keeps the document in memory. Can be told to fail writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    document: Option<String>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already-persisted document.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            ..Self::default()
        }
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Last successfully written document.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl RecordStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.document.clone())
    }

    fn write(&mut self, document: &str) -> Result<()> {
        if self.fail_writes {
            return Err(MoodlogError::Storage("write rejected".to_string()));
        }
        self.document = Some(document.to_string());
        self.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
