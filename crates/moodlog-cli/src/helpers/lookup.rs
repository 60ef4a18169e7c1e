//! Resolving record IDs typed on the command line.

use moodlog_core::{Journal, Record, RecordRef, RecordStorage};

use crate::constants::{FIND_ID_HINT, MIN_SHORT_ID_LEN};
use crate::errors::CliError;
use crate::ui::format::unique_prefix_len;

/// Resolve an exact ID or a unique ID prefix to a record reference.
pub fn resolve_record<S: RecordStorage>(
    journal: &Journal<S>,
    input: &str,
) -> anyhow::Result<RecordRef> {
    let needle = input.trim();
    if needle.is_empty() {
        return Err(CliError::invalid_input("Record ID is empty").into());
    }
    if journal.records().iter().any(|r| r.id == needle) {
        return Ok(RecordRef::id(needle));
    }

    let needle = needle.to_lowercase();
    let matches: Vec<&Record> = journal
        .records()
        .iter()
        .filter(|r| r.id.to_lowercase().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [] => Err(CliError::not_found(format!("Record not found: {}", input), FIND_ID_HINT).into()),
        [record] => Ok(RecordRef::of(record)),
        _ => Err(CliError::invalid_input(format!(
            "ID prefix '{}' is ambiguous ({} records match); type more characters",
            input,
            matches.len()
        ))
        .into()),
    }
}

/// Shortest prefix length that keeps every displayed ID unique.
pub fn display_id_len(records: &[Record]) -> usize {
    unique_prefix_len(records.iter().map(|r| r.id.as_str()), MIN_SHORT_ID_LEN)
}
