//! Add record command handler.

use moodlog_core::NewRecord;

use crate::app::{AppContext, FileJournal};
use crate::cli::AddArgs;
use crate::helpers::{
    content_or_prompt, display_id_len, mood_or_prompt, parse_date_or_today, parse_time_arg,
};
use crate::ui::format::{format_time, short_id};
use crate::ui::theme::{stars, styled, styles};
use crate::ui::{badge, blank_line, hint, print, Badge, OutputMode};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let mut journal = ctx.open_journal()?;
    run_add(ctx, &mut journal, args)
}

pub fn run_add(ctx: &AppContext, journal: &mut FileJournal, args: &AddArgs) -> anyhow::Result<()> {
    let content = content_or_prompt(args.content.as_deref())?;
    let mood = mood_or_prompt(args.mood.as_deref())?;
    let date = parse_date_or_today(args.date.as_deref())?;

    let mut new_record = NewRecord::new(date, content, mood).with_completed(args.completed);
    if let Some(ref time) = args.time {
        new_record = new_record.with_time(parse_time_arg(time)?);
    }

    let record = journal.add(new_record)?.clone();
    if ctx.quiet() {
        return Ok(());
    }

    let ui_ctx = ctx.ui_context(false, None);
    match ui_ctx.mode {
        OutputMode::Pretty => {
            let id = short_id(&record.id, display_id_len(journal.records()));
            print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, "Added record"));
            let context = format!(
                "ID: {}  \u{00B7}  {} {}",
                id,
                record.date,
                format_time(&record.time)
            );
            println!(
                "{}  {}",
                styled(&context, styles::dim(), ui_ctx.color),
                stars(record.mood, ui_ctx.unicode, ui_ctx.color)
            );
            blank_line(&ui_ctx);
            print(
                &ui_ctx,
                &hint(
                    &ui_ctx,
                    &format!("moodlog show {}  \u{00B7}  moodlog list", id),
                ),
            );
        }
        OutputMode::Plain | OutputMode::Json => {
            println!("status=ok");
            println!("id={}", record.id);
            println!("date={}", record.date);
            println!("time={}", record.time);
            println!("mood={}", record.mood);
            println!("completed={}", record.completed);
        }
    }
    Ok(())
}
