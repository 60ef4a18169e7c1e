//! String formatting utilities for UI rendering.

use chrono::NaiveDate;

use moodlog_core::query::match_ranges;

use super::theme::{styled, styles};

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Wrap text to a given width, preserving newlines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_line.chars().count() + 1 + word.chars().count() <= width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                lines.push(current_line);
                current_line = word.to_string();
            }
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    lines
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

/// Shortest prefix length (at least `min_len`) that keeps every ID distinct.
pub fn unique_prefix_len<'a>(ids: impl IntoIterator<Item = &'a str>, min_len: usize) -> usize {
    let mut ids: Vec<&str> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();

    let mut len = min_len;
    for pair in ids.windows(2) {
        let shared = pair[0]
            .chars()
            .zip(pair[1].chars())
            .take_while(|(a, b)| a == b)
            .count();
        len = len.max(shared + 1);
    }
    len
}

/// First `len` characters of an ID.
pub fn short_id(id: &str, len: usize) -> String {
    id.chars().take(len).collect()
}

/// Long-form date for detail views, e.g. "Monday, January 1, 2024".
pub fn format_date_long(date: &NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Time of day, or a dash when unknown.
pub fn format_time(time: &str) -> String {
    if time.trim().is_empty() {
        "-".to_string()
    } else {
        time.to_string()
    }
}

/// Highlight every case-insensitive match of `needle` in `text`.
///
/// Without color the text is returned unchanged.
pub fn highlight(text: &str, needle: Option<&str>, color: bool) -> String {
    let Some(needle) = needle else {
        return text.to_string();
    };
    if !color {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for range in match_ranges(text, needle) {
        out.push_str(&text[last..range.start]);
        out.push_str(&styled(&text[range.clone()], styles::highlight(), true));
        last = range.end;
    }
    out.push_str(&text[last..]);
    out
}
