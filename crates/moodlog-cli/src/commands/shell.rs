//! Interactive session.
//!
//! The shell keeps one journal open for its lifetime, so the undo history
//! and the filter/sort criteria survive between commands. Lines are read
//! with a prompt on a terminal, or one per line from piped stdin.

use std::io::{self, BufRead, Lines, StdinLock};

use clap::Parser;
use dialoguer::Input;

use moodlog_core::{Criteria, RecordStorage};

use crate::app::{AppContext, FileJournal};
use crate::cli::{ShellCommand, ShellLine, SortArgs, UndoArgs};
use crate::errors::split_hint;
use crate::helpers::{apply_filter, confirm, describe_criteria, split_command_line};
use crate::ui::{
    badge, header, hint, kv, print, print_error, receipt, Badge, OutputMode, UiContext,
};

use super::entries::{run_add, run_delete, run_edit, run_list, run_show, run_toggle};
use super::stats::run_stats;
use super::transfer::{run_export, run_import};

enum Flow {
    Continue,
    Quit,
}

/// Where session lines come from.
enum LineSource {
    Prompt,
    Piped(Lines<StdinLock<'static>>),
}

impl LineSource {
    fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        match self {
            LineSource::Prompt => {
                let line = Input::<String>::new()
                    .with_prompt("moodlog")
                    .allow_empty(true)
                    .interact_text();
                match line {
                    Ok(line) => Ok(Some(line)),
                    Err(err) => {
                        tracing::debug!(%err, "prompt closed");
                        Ok(None)
                    }
                }
            }
            LineSource::Piped(lines) => Ok(lines.next().transpose()?),
        }
    }
}

pub fn handle_shell(ctx: &AppContext) -> anyhow::Result<()> {
    let mut journal = ctx.open_journal()?;
    let mut criteria = Criteria::new().sort(ctx.default_sort()?);
    let ui_ctx = ctx.ui_context(false, None);

    let mut source = if ui_ctx.is_interactive() {
        LineSource::Prompt
    } else {
        LineSource::Piped(io::stdin().lock().lines())
    };

    if matches!(source, LineSource::Prompt) && !ctx.quiet() {
        let location = journal.storage().location();
        print(&ui_ctx, &header(&ui_ctx, "shell", Some(&location)));
        print(
            &ui_ctx,
            &hint(&ui_ctx, "Type `help` for commands, `quit` to leave."),
        );
    }

    while let Some(line) = source.next_line()? {
        let words = match split_command_line(&line) {
            Ok(words) => words,
            Err(err) => {
                report(&ui_ctx, &err);
                continue;
            }
        };
        if words.is_empty() {
            continue;
        }

        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(err) => {
                let _ = err.print();
                continue;
            }
        };

        match dispatch(ctx, &ui_ctx, &mut journal, &mut criteria, parsed.command) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => report(&ui_ctx, &err),
        }
    }

    tracing::debug!(undo_depth = journal.undo_depth(), "shell session ended");
    Ok(())
}

fn dispatch(
    ctx: &AppContext,
    ui_ctx: &UiContext,
    journal: &mut FileJournal,
    criteria: &mut Criteria,
    command: ShellCommand,
) -> anyhow::Result<Flow> {
    match command {
        ShellCommand::Add(args) => run_add(ctx, journal, &args)?,
        ShellCommand::Edit(args) => run_edit(ctx, journal, &args)?,
        ShellCommand::Toggle(args) => run_toggle(ctx, journal, &args)?,
        ShellCommand::Delete(args) => run_delete(ctx, journal, &args)?,
        ShellCommand::List(args) => run_list(ctx, journal, &args, criteria)?,
        ShellCommand::Show(args) => run_show(ctx, journal, &args)?,
        ShellCommand::Stats(args) => run_stats(ctx, journal, &args)?,
        ShellCommand::Export(args) => run_export(ctx, journal, &args)?,
        ShellCommand::Import(args) => run_import(ctx, journal, &args)?,
        ShellCommand::Undo(args) => run_undo(ctx, ui_ctx, journal, &args)?,
        ShellCommand::Filter(args) => {
            *criteria = apply_filter(criteria.clone(), &args)?;
            print_criteria(ctx, ui_ctx, criteria);
        }
        ShellCommand::Sort(SortArgs { mode }) => {
            criteria.sort = mode.parse()?;
            print_criteria(ctx, ui_ctx, criteria);
        }
        ShellCommand::Clear => {
            criteria.reset();
            print_criteria(ctx, ui_ctx, criteria);
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn run_undo(
    ctx: &AppContext,
    ui_ctx: &UiContext,
    journal: &mut FileJournal,
    args: &UndoArgs,
) -> anyhow::Result<()> {
    if !journal.can_undo() {
        if !ctx.quiet() {
            match ui_ctx.mode {
                OutputMode::Pretty => {
                    print(ui_ctx, &badge(ui_ctx, Badge::Info, "Nothing to undo"));
                }
                OutputMode::Plain | OutputMode::Json => println!("status=empty"),
            }
        }
        return Ok(());
    }

    if !confirm(ui_ctx, "Undo the last change?", args.yes, ctx.confirm_enabled()?)? {
        if !ctx.quiet() {
            match ui_ctx.mode {
                OutputMode::Pretty => print(ui_ctx, &badge(ui_ctx, Badge::Info, "Cancelled")),
                OutputMode::Plain | OutputMode::Json => println!("status=cancelled"),
            }
        }
        return Ok(());
    }

    journal.undo()?;
    if !ctx.quiet() {
        let remaining = journal.undo_depth().to_string();
        let records = journal.records().len().to_string();
        print(
            ui_ctx,
            &receipt(
                ui_ctx,
                "Undid last change",
                &[
                    ("Records", records.as_str()),
                    ("Undo left", remaining.as_str()),
                ],
            ),
        );
    }
    Ok(())
}

fn print_criteria(ctx: &AppContext, ui_ctx: &UiContext, criteria: &Criteria) {
    if ctx.quiet() {
        return;
    }
    let filters = describe_criteria(criteria).unwrap_or_else(|| "none".to_string());
    print(ui_ctx, &kv(ui_ctx, "Filters", &filters));
    print(ui_ctx, &kv(ui_ctx, "Sort", criteria.sort.as_str()));
}

fn report(ui_ctx: &UiContext, err: &anyhow::Error) {
    let message = err.to_string();
    let (message, error_hint) = split_hint(&message);
    print_error(ui_ctx, message, error_hint);
}
