use moodlog_core::{Criteria, RecordStorage};

use crate::app::{AppContext, FileJournal};
use crate::cli::ListArgs;
use crate::errors::CliError;
use crate::helpers::{
    apply_filter, describe_criteria, display_id_len, parse_output_format, parse_sort,
};
use crate::output::{print_record_list, records_json, ListView};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let journal = ctx.open_journal()?;
    let base = Criteria::new().sort(ctx.default_sort()?);
    run_list(ctx, &journal, args, &base)
}

/// List records matching `base` with the command-line filters layered on top.
pub fn run_list(
    ctx: &AppContext,
    journal: &FileJournal,
    args: &ListArgs,
    base: &Criteria,
) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;
    if args.json && format.is_some() {
        return Err(CliError::invalid_input("--format cannot be used with --json").into());
    }

    let mut criteria = apply_filter(base.clone(), &args.filter)?;
    criteria.sort = parse_sort(args.sort.as_deref(), criteria.sort)?;

    let records = journal.view(&criteria);
    let ui_ctx = ctx.ui_context(args.json, args.format.as_deref());

    if ui_ctx.mode.is_json() {
        let output = serde_json::to_string_pretty(&records_json(records.iter().copied()))?;
        println!("{}", output);
        return Ok(());
    }

    let context = describe_criteria(&criteria);
    let path = journal.storage().location();
    let view = ListView {
        total: journal.records().len(),
        id_len: display_id_len(journal.records()),
        search: criteria.search.as_deref(),
        context: context.as_deref(),
        path: Some(&path),
    };
    print_record_list(&ui_ctx, &records, &view, ctx.quiet());
    Ok(())
}
