//! UI primitives for the Moodlog CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens, mood colors, stars, symbols
//! - **Render**: Tables, headers, receipts, hints, bars
//! - **Format**: String utilities (truncate, wrap, highlight, short IDs)
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::{UiContext, Badge};
//! use crate::ui::render::{header, simple_table, hint};
//!
//! let ctx = UiContext::from_env(args.json, args.format.as_deref(), cli.no_color, cli.ascii);
//!
//! if ctx.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//!
//! println!("{}", header(&ctx, "list", None));
//! println!("{}", simple_table(&ctx, &columns, &rows));
//! println!("{}", hint(&ctx, "moodlog show <id>"));
//! ```

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

// Re-export core types at module level
pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

// Re-export commonly used render functions
pub use render::{
    badge, bar, blank_line, divider, header, header_with_context, hint, kv, print, print_error,
    receipt, simple_table, Column,
};
