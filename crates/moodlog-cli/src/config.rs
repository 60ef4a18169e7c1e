use std::path::{Path, PathBuf};

use moodlog_core::transfer::EXPORT_FILE_NAME;
use moodlog_core::SortMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MoodlogConfig {
    #[serde(default)]
    pub journal: JournalSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct JournalSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UiSection {
    /// Sort order used by `list` when `--sort` is absent
    #[serde(default)]
    pub default_sort: SortMode,
    /// Ask before delete and undo
    #[serde(default = "default_confirm", alias = "confirm_delete")]
    pub confirm: bool,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            default_sort: SortMode::default(),
            confirm: default_confirm(),
        }
    }
}

fn default_confirm() -> bool {
    true
}

impl MoodlogConfig {
    pub fn new(journal_path: PathBuf) -> Self {
        Self {
            journal: JournalSection {
                path: Some(journal_path.to_string_lossy().to_string()),
            },
            ui: UiSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_journal_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join(EXPORT_FILE_NAME))
}

pub fn read_config(path: &Path) -> anyhow::Result<MoodlogConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &MoodlogConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("moodlog"));
        }
    }
    Ok(home_dir()?.join(".config").join("moodlog"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("moodlog"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("moodlog"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
