use crate::app::{AppContext, FileJournal};
use crate::cli::DeleteArgs;
use crate::helpers::{confirm, resolve_record};
use crate::ui::format::{single_line, truncate};
use crate::ui::{badge, print, receipt, Badge, OutputMode};

use super::record_not_found;

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut journal = ctx.open_journal()?;
    run_delete(ctx, &mut journal, args)
}

pub fn run_delete(
    ctx: &AppContext,
    journal: &mut FileJournal,
    args: &DeleteArgs,
) -> anyhow::Result<()> {
    let target = resolve_record(journal, &args.id)?;
    let ui_ctx = ctx.ui_context(false, None);

    let prompt = match journal.get(&target) {
        Some(record) => format!(
            "Delete the {} record \"{}\"?",
            record.date,
            truncate(&single_line(&record.content), 40)
        ),
        None => return Err(record_not_found(&target, &args.id)),
    };

    if !confirm(&ui_ctx, &prompt, args.yes, ctx.confirm_enabled()?)? {
        if !ctx.quiet() {
            match ui_ctx.mode {
                OutputMode::Pretty => {
                    print(&ui_ctx, &badge(&ui_ctx, Badge::Info, "Cancelled"));
                }
                OutputMode::Plain | OutputMode::Json => {
                    println!("status=cancelled");
                }
            }
        }
        return Ok(());
    }

    let removed = journal
        .delete(&target)?
        .ok_or_else(|| record_not_found(&target, &args.id))?;

    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Deleted record", &[("Deleted", removed.id.as_str())]),
        );
    }
    Ok(())
}
