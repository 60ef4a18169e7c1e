//! Text and table output formatting for records and statistics.

use moodlog_core::record::MAX_MOOD;
use moodlog_core::stats::{format_metric, format_rating};
use moodlog_core::{Record, Statistics};

use crate::constants::CONTENT_PREVIEW_LEN;
use crate::ui::format::{
    format_date_long, format_time, highlight, short_id, single_line, truncate, wrap,
};
use crate::ui::theme::{stars, styled, styles, CHECK, DOT};
use crate::ui::{
    bar, blank_line, divider, header_with_context, hint, kv, print, simple_table, Column,
    OutputMode, UiContext,
};

const HISTOGRAM_WIDTH: usize = 30;

/// What a record list is showing, for headers and hints.
pub struct ListView<'a> {
    /// Records in the store before filtering
    pub total: usize,
    /// Characters of ID to display
    pub id_len: usize,
    /// Search text to highlight
    pub search: Option<&'a str>,
    /// Active filters shown next to the header
    pub context: Option<&'a str>,
    /// Journal path shown under the header
    pub path: Option<&'a str>,
}

/// Print a filtered record list.
pub fn print_record_list(ui: &UiContext, records: &[&Record], view: &ListView<'_>, quiet: bool) {
    if records.is_empty() {
        if quiet {
            return;
        }
        match ui.mode {
            OutputMode::Pretty => {
                print(ui, &header_with_context(ui, "list", view.context, view.path));
                blank_line(ui);
                let message = if view.total == 0 {
                    "No records yet. Add one with `moodlog add -c <TEXT> -m <1-5>`."
                } else {
                    "No records match the current filters."
                };
                print(ui, &hint(ui, message));
            }
            OutputMode::Plain | OutputMode::Json => println!("count=0"),
        }
        return;
    }

    match ui.mode {
        OutputMode::Pretty => {
            if !quiet {
                print(ui, &header_with_context(ui, "list", view.context, view.path));
                blank_line(ui);
            }

            let columns = [
                Column::new("ID"),
                Column::new("Date"),
                Column::new("Time"),
                Column::new("Mood"),
                Column::new("Done"),
                Column::new("Content"),
            ];
            let rows: Vec<Vec<String>> = records
                .iter()
                .map(|record| {
                    let preview = truncate(&single_line(&record.content), CONTENT_PREVIEW_LEN);
                    vec![
                        short_id(&record.id, view.id_len),
                        record.date.to_string(),
                        format_time(&record.time),
                        stars(record.mood, ui.unicode, ui.color),
                        done_marker(ui, record.completed),
                        highlight(&preview, view.search, ui.color),
                    ]
                })
                .collect();
            print(ui, &simple_table(ui, &columns, &rows));

            if !quiet {
                blank_line(ui);
                let count = if records.len() == view.total {
                    format!("{} records", view.total)
                } else {
                    format!("showing {} of {} records", records.len(), view.total)
                };
                let first = short_id(&records[0].id, view.id_len);
                let text = format!("{}. moodlog show {}", count, first);
                print(ui, &hint(ui, &text));
            }
        }
        OutputMode::Plain | OutputMode::Json => {
            for record in records {
                println!("{}", plain_line(record));
            }
        }
    }
}

/// One record per line: `id date time mood done|open content`.
fn plain_line(record: &Record) -> String {
    format!(
        "{} {} {} {} {} {}",
        record.id,
        record.date,
        format_time(&record.time),
        record.mood,
        if record.completed { "done" } else { "open" },
        single_line(&record.content)
    )
}

fn done_marker(ui: &UiContext, completed: bool) -> String {
    if completed {
        styled(CHECK.get(ui.unicode), styles::ok(), ui.color)
    } else {
        String::new()
    }
}

/// Print a single record in detail.
pub fn print_record(ui: &UiContext, record: &Record, path: Option<&str>, quiet: bool) {
    match ui.mode {
        OutputMode::Pretty => {
            if !quiet {
                print(ui, &header_with_context(ui, "show", None, path));
                blank_line(ui);
            }
            print(ui, &kv(ui, "ID", &record.id));
            print(ui, &kv(ui, "Date", &format_date_long(&record.date)));
            print(ui, &kv(ui, "Time", &format_time(&record.time)));
            let rating = format!(
                "{} ({}/{})",
                stars(record.mood, ui.unicode, ui.color),
                record.mood,
                MAX_MOOD
            );
            print(ui, &kv(ui, "Mood", &rating));
            print(ui, &kv(ui, "Completed", if record.completed { "yes" } else { "no" }));
            blank_line(ui);
            for line in wrap(&record.content, ui.width.clamp(20, 100)) {
                print(ui, &line);
            }
        }
        OutputMode::Plain | OutputMode::Json => {
            println!("{}", kv(ui, "id", &record.id));
            println!("{}", kv(ui, "date", &record.date.to_string()));
            println!("{}", kv(ui, "time", &record.time));
            println!("{}", kv(ui, "mood", &record.mood.to_string()));
            println!("{}", kv(ui, "completed", &record.completed.to_string()));
            println!("{}", kv(ui, "content", &single_line(&record.content)));
        }
    }
}

/// Print summary metrics and the per-rating histogram.
pub fn print_statistics(ui: &UiContext, stats: &Statistics, path: Option<&str>, quiet: bool) {
    let metrics = [
        ("Count", stats.count.to_string()),
        ("Average", format_metric(stats.mean)),
        ("Mode", format_rating(stats.mode)),
        ("Std dev", format_metric(stats.std_dev)),
        ("Min", format_rating(stats.min)),
        ("Max", format_rating(stats.max)),
    ];

    match ui.mode {
        OutputMode::Pretty => {
            if !quiet {
                print(ui, &header_with_context(ui, "stats", None, path));
                blank_line(ui);
            }
            for (key, value) in &metrics {
                print(ui, &kv(ui, key, value));
            }
            print(ui, &divider(ui));
            if stats.is_empty() {
                print(ui, &hint(ui, "No data yet."));
                return;
            }
            let dot = DOT.get(ui.unicode);
            let buckets: Vec<(u8, usize)> = stats.distribution.iter().collect();
            for (mood, count) in buckets.into_iter().rev() {
                let cells = bar(ui, stats.distribution.bar_ratio(mood), HISTOGRAM_WIDTH);
                print(
                    ui,
                    &format!(
                        "{} {} {} {}",
                        stars(mood, ui.unicode, ui.color),
                        dot,
                        styled(&cells, styles::mood(mood), ui.color),
                        count
                    ),
                );
            }
        }
        OutputMode::Plain | OutputMode::Json => {
            for (key, value) in &metrics {
                println!("{}", kv(ui, key, value));
            }
            for (mood, count) in stats.distribution.iter() {
                println!("mood_{}={}", mood, count);
            }
        }
    }
}
