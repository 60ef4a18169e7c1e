//! JSON document on the local filesystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::traits::RecordStorage;
use crate::error::{MoodlogError, Result};

/// Stores the record document as a single JSON file.
///
/// Writes go through `fs::write_atomic`, so a crash mid-write leaves the
/// previous file intact.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl RecordStorage for JsonFileStorage {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(document) => Ok(Some(document)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(MoodlogError::Storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                err
            ))),
        }
    }

    fn write(&mut self, document: &str) -> Result<()> {
        crate::fs::write_atomic(&self.path, document.as_bytes()).map_err(|err| {
            MoodlogError::Storage(format!(
                "Failed to write {}: {}",
                self.path.display(),
                err
            ))
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("moodRecords.json"));

        assert!(!storage.exists());
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let mut storage = JsonFileStorage::new(dir.path().join("data").join("moodRecords.json"));

        storage.write("[]").unwrap();

        assert!(storage.exists());
        assert_eq!(storage.read().unwrap().as_deref(), Some("[]"));
        assert!(storage.location().ends_with("moodRecords.json"));
    }

    #[test]
    fn test_unreadable_path_is_storage_error() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());

        let err = storage.read().unwrap_err();
        assert!(matches!(err, MoodlogError::Storage(_)));
    }
}
