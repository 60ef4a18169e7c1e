//! Export and import command handlers.

use std::path::Path;

use moodlog_core::fs::write_atomic;
use moodlog_core::transfer::EXPORT_FILE_NAME;

use crate::app::{AppContext, FileJournal};
use crate::cli::{ExportArgs, ImportArgs};
use crate::helpers::read_import_file;
use crate::ui::{badge, print, receipt, Badge, OutputMode};

const STDOUT_TARGET: &str = "-";

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let journal = ctx.open_journal()?;
    run_export(ctx, &journal, args)
}

pub fn run_export(
    ctx: &AppContext,
    journal: &FileJournal,
    args: &ExportArgs,
) -> anyhow::Result<()> {
    let document = journal.export_document()?;
    let target = args.output.as_deref().unwrap_or(EXPORT_FILE_NAME);

    if target == STDOUT_TARGET {
        println!("{}", document);
        return Ok(());
    }

    let path = Path::new(target);
    write_atomic(path, document.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to write export {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), records = journal.records().len(), "exported");

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, None);
        let count = journal.records().len().to_string();
        let location = path.display().to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Exported records",
                &[("Path", location.as_str()), ("Records", count.as_str())],
            ),
        );
    }
    Ok(())
}

pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    let mut journal = ctx.open_journal()?;
    run_import(ctx, &mut journal, args)
}

/// Import valid records from a file. A document with no valid records is
/// reported, not treated as an error.
pub fn run_import(
    ctx: &AppContext,
    journal: &mut FileJournal,
    args: &ImportArgs,
) -> anyhow::Result<()> {
    let document = read_import_file(&args.file)?;
    let report = journal.import_document(&document)?;
    if report.skipped > 0 {
        tracing::warn!(skipped = report.skipped, "skipped invalid import elements");
    }

    if ctx.quiet() {
        return Ok(());
    }
    let ui_ctx = ctx.ui_context(false, None);
    match ui_ctx.mode {
        OutputMode::Pretty => {
            let kind = if report.imported > 0 {
                Badge::Ok
            } else {
                Badge::Warn
            };
            print(&ui_ctx, &badge(&ui_ctx, kind, &report.status_message()));
            if report.skipped > 0 {
                print(
                    &ui_ctx,
                    &format!("  {} invalid elements skipped", report.skipped),
                );
            }
        }
        OutputMode::Plain | OutputMode::Json => {
            let status = if report.imported > 0 { "ok" } else { "empty" };
            println!("status={}", status);
            println!("imported={}", report.imported);
            println!("skipped={}", report.skipped);
            println!("message={}", report.status_message());
        }
    }
    Ok(())
}
