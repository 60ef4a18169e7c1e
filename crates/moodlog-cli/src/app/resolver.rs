//! Path resolution for config and journal files.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::{default_config_path, default_journal_path, read_config, MoodlogConfig};

/// Resolve the config file path, checking MOODLOG_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("MOODLOG_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file, or defaults when it does not exist.
pub fn load_config() -> anyhow::Result<MoodlogConfig> {
    let path = resolve_config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file; using defaults");
        return Ok(MoodlogConfig::default());
    }
    read_config(&path)
}

/// Resolve the journal path: `--journal`/`MOODLOG_PATH`, then config, then the data dir.
pub fn resolve_journal_path(cli: &Cli, config: &MoodlogConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.journal.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.journal.path.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    default_journal_path()
}
