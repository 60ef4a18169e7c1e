//! Filesystem utilities for atomic writes.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Write `data` to `path` through a sibling temp file and a rename.
///
/// Readers see either the previous contents or the new contents, never a
/// partial write. Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the parent cannot be created, the temp file cannot be
/// written and synced, or the final rename fails.
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let temp_path = temp_path_for(path)?;
    if let Some(parent) = temp_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)?;
    let written = file.write_all(data).and_then(|_| file.sync_all());
    drop(file);
    if let Err(err) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    rename_with_fallback(&temp_path, path)
}

fn temp_path_for(path: &Path) -> io::Result<PathBuf> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Invalid journal filename"))?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::other(format!("System time error: {}", e)))?
        .as_nanos();
    Ok(path.with_file_name(format!(".{}.{}.tmp", filename, nanos)))
}

/// Atomically rename a file, with fallback for platforms where rename fails if target exists.
///
/// On some platforms (notably Windows), `fs::rename` fails if the destination already exists.
/// This function handles that case by removing the destination first and retrying.
///
/// If the rename ultimately fails, the temp file is cleaned up.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}
