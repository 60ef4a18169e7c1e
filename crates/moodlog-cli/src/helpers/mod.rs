//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Confirmation, prompts, import files and shell line splitting (`input`)
//! - Record ID resolution (`lookup`)
//! - Date, time, mood, sort, filter and format parsing (`parsing`)

mod input;
mod lookup;
mod parsing;

// Re-export public API
pub use input::{
    confirm, content_or_prompt, mood_or_prompt, read_import_file, split_command_line,
};
pub use lookup::{display_id_len, resolve_record};
pub use parsing::{
    apply_filter, describe_criteria, parse_date_or_today, parse_mood_arg, parse_output_format,
    parse_sort, parse_time_arg, OutputFormat,
};
