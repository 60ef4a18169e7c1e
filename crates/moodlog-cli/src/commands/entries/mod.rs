pub mod add;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;
pub mod toggle;

pub use add::{handle_add, run_add};
pub use delete::{handle_delete, run_delete};
pub use edit::{handle_edit, run_edit};
pub use list::{handle_list, run_list};
pub use show::{handle_show, run_show};
pub use toggle::{handle_toggle, run_toggle};

use moodlog_core::RecordRef;

use crate::constants::FIND_ID_HINT;
use crate::errors::CliError;

/// Error for a reference that resolved but was gone by the time it was used.
pub(crate) fn record_not_found(target: &RecordRef, input: &str) -> anyhow::Error {
    tracing::debug!(?target, "record disappeared before the change");
    CliError::not_found(format!("Record not found: {}", input), FIND_ID_HINT).into()
}
