//! Application-level utilities for the Moodlog CLI.
//!
//! This module provides:
//! - The per-invocation `AppContext` (CLI args plus lazy config)
//! - Path resolution for config and journal files

mod context;
mod resolver;

// Re-export public API
pub use context::{AppContext, FileJournal};
pub use resolver::resolve_config_path;
