use moodlog_core::RecordStorage;

use crate::app::{AppContext, FileJournal};
use crate::cli::StatsArgs;
use crate::output::{print_statistics, statistics_json};

pub fn handle_stats(ctx: &AppContext, args: &StatsArgs) -> anyhow::Result<()> {
    let journal = ctx.open_journal()?;
    run_stats(ctx, &journal, args)
}

/// Statistics always cover the whole journal, never the filtered view.
pub fn run_stats(ctx: &AppContext, journal: &FileJournal, args: &StatsArgs) -> anyhow::Result<()> {
    let stats = journal.statistics();
    let ui_ctx = ctx.ui_context(args.json, None);
    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&statistics_json(&stats))?);
        return Ok(());
    }
    let path = journal.storage().location();
    print_statistics(&ui_ctx, &stats, Some(&path), ctx.quiet());
    Ok(())
}
