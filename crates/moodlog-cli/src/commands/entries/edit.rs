//! Edit record command handler.

use moodlog_core::record::parse_date;
use moodlog_core::RecordPatch;

use crate::app::{AppContext, FileJournal};
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::helpers::{parse_mood_arg, parse_time_arg, resolve_record};
use crate::ui::{print, receipt};

use super::record_not_found;

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let mut journal = ctx.open_journal()?;
    run_edit(ctx, &mut journal, args)
}

pub fn run_edit(
    ctx: &AppContext,
    journal: &mut FileJournal,
    args: &EditArgs,
) -> anyhow::Result<()> {
    let patch = build_patch(args)?;
    if patch.is_empty() {
        return Err(CliError::invalid_input(
            "Nothing to change. Pass at least one of --date, --time, --content, --mood, --completed",
        )
        .into());
    }

    let target = resolve_record(journal, &args.id)?;
    let record = journal
        .edit(&target, patch)?
        .cloned()
        .ok_or_else(|| record_not_found(&target, &args.id))?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, None);
        let date = record.date.to_string();
        let mood = record.mood.to_string();
        let completed = record.completed.to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Updated record",
                &[
                    ("ID", record.id.as_str()),
                    ("Date", date.as_str()),
                    ("Time", record.time.as_str()),
                    ("Mood", mood.as_str()),
                    ("Completed", completed.as_str()),
                ],
            ),
        );
    }
    Ok(())
}

fn build_patch(args: &EditArgs) -> anyhow::Result<RecordPatch> {
    let mut patch = RecordPatch::new();
    if let Some(ref date) = args.date {
        patch = patch.date(parse_date(date)?);
    }
    if let Some(ref time) = args.time {
        patch = patch.time(parse_time_arg(time)?);
    }
    if let Some(ref content) = args.content {
        patch = patch.content(content.clone());
    }
    if let Some(ref mood) = args.mood {
        patch = patch.mood(parse_mood_arg(mood)?);
    }
    if let Some(completed) = args.completed {
        patch = patch.completed(completed);
    }
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> EditArgs {
        EditArgs {
            id: "abc".to_string(),
            date: None,
            time: None,
            content: None,
            mood: None,
            completed: None,
        }
    }

    #[test]
    fn test_build_patch_empty() {
        assert!(build_patch(&args()).unwrap().is_empty());
    }

    #[test]
    fn test_build_patch_rejects_bad_mood() {
        let args = EditArgs {
            mood: Some("9".to_string()),
            ..args()
        };
        assert!(build_patch(&args).is_err());
    }

    #[test]
    fn test_build_patch_sets_fields() {
        let args = EditArgs {
            time: Some("7:30".to_string()),
            completed: Some(true),
            ..args()
        };
        let patch = build_patch(&args).unwrap();
        assert!(!patch.is_empty());
    }
}
