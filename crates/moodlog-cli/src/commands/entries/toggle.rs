use crate::app::{AppContext, FileJournal};
use crate::cli::RecordArgs;
use crate::helpers::resolve_record;
use crate::ui::{print, receipt};

use super::record_not_found;

pub fn handle_toggle(ctx: &AppContext, args: &RecordArgs) -> anyhow::Result<()> {
    let mut journal = ctx.open_journal()?;
    run_toggle(ctx, &mut journal, args)
}

pub fn run_toggle(
    ctx: &AppContext,
    journal: &mut FileJournal,
    args: &RecordArgs,
) -> anyhow::Result<()> {
    let target = resolve_record(journal, &args.id)?;
    let completed = journal
        .toggle_completed(&target)?
        .ok_or_else(|| record_not_found(&target, &args.id))?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, None);
        let title = if completed {
            "Marked completed"
        } else {
            "Marked not completed"
        };
        let id = journal
            .get(&target)
            .map(|r| r.id.clone())
            .unwrap_or_default();
        let completed = completed.to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                title,
                &[("ID", id.as_str()), ("Completed", completed.as_str())],
            ),
        );
    }
    Ok(())
}
