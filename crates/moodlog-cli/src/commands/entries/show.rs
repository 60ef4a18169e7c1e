use moodlog_core::RecordStorage;

use crate::app::{AppContext, FileJournal};
use crate::cli::ShowArgs;
use crate::helpers::resolve_record;
use crate::output::{print_record, record_json};

use super::record_not_found;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let journal = ctx.open_journal()?;
    run_show(ctx, &journal, args)
}

pub fn run_show(ctx: &AppContext, journal: &FileJournal, args: &ShowArgs) -> anyhow::Result<()> {
    let target = resolve_record(journal, &args.id)?;
    let record = journal
        .get(&target)
        .ok_or_else(|| record_not_found(&target, &args.id))?;

    let ui_ctx = ctx.ui_context(args.json, None);
    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&record_json(record))?);
    } else {
        let path = journal.storage().location();
        print_record(&ui_ctx, record, Some(&path), ctx.quiet());
    }
    Ok(())
}
