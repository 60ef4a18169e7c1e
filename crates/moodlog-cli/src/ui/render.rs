//! Rendering primitives for CLI output.

use comfy_table::{Attribute, Cell, ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge, BAR, DOT};

/// Render a header line for a command.
///
/// Pretty mode: "Moodlog · command (context)" with optional path
/// Plain mode: "moodlog command"
///
/// # Arguments
/// - `command`: The command name (e.g., "list", "stats")
/// - `context`: Optional context shown in parentheses (e.g., active filters)
/// - `path`: Optional journal path to display on second line
pub fn header_with_context(
    ctx: &UiContext,
    command: &str,
    context: Option<&str>,
    path: Option<&str>,
) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("Moodlog", styles::bold(), ctx.color);
            let dot = DOT.get(ctx.unicode);
            let mut out = if let Some(c) = context {
                format!("{} {} {} ({})", title, dot, command, c)
            } else {
                format!("{} {} {}", title, dot, command)
            };
            if let Some(p) = path {
                let display_path = if p.chars().count() > 50 {
                    let tail: String = p.chars().skip(p.chars().count() - 47).collect();
                    format!("...{}", tail)
                } else {
                    p.to_string()
                };
                out.push_str(&format!("\n{}", kv(ctx, "Path", &display_path)));
            }
            out
        }
        OutputMode::Plain => {
            format!("moodlog {}", command)
        }
        OutputMode::Json => String::new(),
    }
}

/// Render a header line for a command (simple version).
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    header_with_context(ctx, command, context, None)
}

/// Render a divider line.
pub fn divider(ctx: &UiContext) -> String {
    if ctx.mode.is_pretty() && ctx.unicode {
        "\u{2500}".repeat(ctx.width.min(60))
    } else {
        "---".to_string()
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let badge_text = kind.display(ctx.unicode);
    let colored_badge = styled(badge_text, kind.style(), ctx.color);

    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
///
/// Pretty mode: "Hint: text" with dim styling
/// Plain mode: "hint=text"
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = styled("Hint:", styles::dim(), ctx.color);
        format!("{} {}", label, text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a receipt (summary block after an action).
///
/// Pretty mode: Badge + indented key-value pairs
/// Plain mode: status=ok + key=value lines
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        lines.push("status=ok".to_string());
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }

    lines.join("\n")
}

/// Render a horizontal bar `ratio` (0.0..=1.0) of `width` cells.
pub fn bar(ctx: &UiContext, ratio: f64, width: usize) -> String {
    let cells = (ratio.clamp(0.0, 1.0) * width as f64).round() as usize;
    BAR.get(ctx.unicode).repeat(cells)
}

/// Column definition for table rendering.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self { header }
    }
}

/// Render a simple table without borders (for record lists).
///
/// Pretty mode: Dim header row, padded columns
/// Plain mode: Space-separated values (no header)
pub fn simple_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if ctx.mode.is_pretty() {
        let mut table = ComfyTable::new();
        table.load_preset(comfy_table::presets::NOTHING);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_width(ctx.width.min(u16::MAX as usize) as u16);

        let header_cells: Vec<Cell> = columns
            .iter()
            .map(|c| {
                let mut cell = Cell::new(c.header);
                if ctx.color {
                    cell = cell.add_attribute(Attribute::Dim);
                }
                cell
            })
            .collect();
        table.set_header(header_cells);

        for i in 0..columns.len() {
            if let Some(column) = table.column_mut(i) {
                column.set_padding((0, 2));
            }
        }

        for row in rows {
            table.add_row(row);
        }

        table.to_string()
    } else {
        rows.iter()
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Print a message to stdout with proper mode handling.
///
/// In JSON mode, this does nothing (JSON output should be handled separately).
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

/// Print an empty line (only in pretty mode).
pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

/// Format an error message with optional hint.
///
/// Pretty mode: "[ERR] message" with optional "Hint: ..." on next line
/// Plain mode: "error=message" with optional "hint=suggestion"
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    } else {
        lines.push(format!("error={}", message));
        if let Some(h) = error_hint {
            lines.push(format!("hint={}", h));
        }
    }

    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}
