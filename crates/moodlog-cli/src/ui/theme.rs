//! Theme definitions for colors, symbols, and badges.

use owo_colors::{OwoColorize, Style};

use moodlog_core::record::MAX_MOOD;

/// Symbol pair for ASCII and Unicode variants.
#[derive(Debug, Clone)]
pub struct SymbolPair {
    pub ascii: &'static str,
    pub unicode: &'static str,
}

impl SymbolPair {
    pub const fn new(ascii: &'static str, unicode: &'static str) -> Self {
        Self { ascii, unicode }
    }

    /// Get the appropriate symbol based on unicode flag.
    pub fn get(&self, unicode: bool) -> &'static str {
        if unicode {
            self.unicode
        } else {
            self.ascii
        }
    }
}

/// Filled rating star.
pub const STAR: SymbolPair = SymbolPair::new("*", "\u{2605}"); // ★
/// Empty rating star.
pub const STAR_EMPTY: SymbolPair = SymbolPair::new(".", "\u{2606}"); // ☆
/// Histogram bar cell.
pub const BAR: SymbolPair = SymbolPair::new("#", "\u{2588}"); // █
/// Completed marker.
pub const CHECK: SymbolPair = SymbolPair::new("x", "\u{2713}"); // ✓
/// Separator between inline fields.
pub const DOT: SymbolPair = SymbolPair::new("|", "\u{00B7}"); // ·

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
    Info,
}

impl Badge {
    /// Get badge text (e.g., "[OK]")
    pub fn text(&self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Warn => "[WARN]",
            Self::Err => "[ERR]",
            Self::Info => "[INFO]",
        }
    }

    /// Get badge with symbol for display.
    pub fn display(&self, unicode: bool) -> &'static str {
        if !unicode {
            return self.text();
        }
        match self {
            Self::Ok => "[\u{2713}]",   // [✓]
            Self::Warn => "[\u{26A0}]", // [⚠]
            Self::Err => "[\u{2717}]",  // [✗]
            Self::Info => "[\u{2139}]", // [ℹ]
        }
    }

    /// Color style for this badge.
    pub fn style(&self) -> Style {
        match self {
            Self::Ok => styles::ok(),
            Self::Warn => styles::warn(),
            Self::Err => styles::err(),
            Self::Info => styles::info(),
        }
    }
}

/// Named styles.
pub mod styles {
    use owo_colors::Style;

    /// Bright/bold text (for titles, values)
    pub fn bold() -> Style {
        Style::new().bold()
    }

    /// Dim text (for labels, metadata)
    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    /// Success
    pub fn ok() -> Style {
        Style::new().green()
    }

    /// Warning
    pub fn warn() -> Style {
        Style::new().yellow()
    }

    /// Error
    pub fn err() -> Style {
        Style::new().red()
    }

    /// Info
    pub fn info() -> Style {
        Style::new().cyan()
    }

    /// Search match inside content
    pub fn highlight() -> Style {
        Style::new().black().on_yellow()
    }

    /// Color for a mood rating, red (low) through green (high).
    pub fn mood(rating: u8) -> Style {
        match rating {
            0 | 1 => Style::new().red(),
            2 => Style::new().bright_red(),
            3 => Style::new().yellow(),
            4 => Style::new().bright_green(),
            _ => Style::new().green(),
        }
    }
}

/// Apply a style when color is enabled; plain text otherwise.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Star rating such as `★★★☆☆`, colored by mood when color is enabled.
pub fn stars(rating: u8, unicode: bool, color: bool) -> String {
    let filled = usize::from(rating.min(MAX_MOOD));
    let empty = usize::from(MAX_MOOD) - filled;
    let text = format!(
        "{}{}",
        STAR.get(unicode).repeat(filled),
        STAR_EMPTY.get(unicode).repeat(empty)
    );
    styled(&text, styles::mood(rating), color)
}
