//! Application context for the Moodlog CLI.
//!
//! Provides a unified context that combines CLI arguments with
//! lazily-loaded configuration.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use moodlog_core::{Journal, JsonFileStorage, SortMode};

use crate::cli::Cli;
use crate::config::MoodlogConfig;
use crate::ui::UiContext;

use super::resolver::{load_config, resolve_journal_path};

/// The journal type every command works against.
pub type FileJournal = Journal<JsonFileStorage>;

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<MoodlogConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the configuration, loading it lazily if needed.
    ///
    /// A missing config file yields the defaults.
    pub fn config(&self) -> anyhow::Result<&MoodlogConfig> {
        self.config.get_or_try_init(load_config)
    }

    /// Resolve the journal file path.
    pub fn journal_path(&self) -> anyhow::Result<PathBuf> {
        resolve_journal_path(self.cli, self.config()?)
    }

    /// Open the journal, creating nothing until the first write.
    pub fn open_journal(&self) -> anyhow::Result<FileJournal> {
        let path = self.journal_path()?;
        tracing::debug!(path = %path.display(), "opening journal");
        Ok(Journal::open(JsonFileStorage::new(path))?)
    }

    /// Sort order for `list` when none is given.
    pub fn default_sort(&self) -> anyhow::Result<SortMode> {
        Ok(self.config()?.ui.default_sort)
    }

    /// Whether delete and undo ask for confirmation.
    pub fn confirm_enabled(&self) -> anyhow::Result<bool> {
        Ok(self.config()?.ui.confirm)
    }

    /// Create a UI context for output formatting.
    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color, self.cli.ascii)
    }
}
