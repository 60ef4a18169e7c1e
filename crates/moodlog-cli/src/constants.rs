//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and used by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const GENERAL: i32 = 1;

    /// Resource not found (record ID, import file).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;
}

/// Hint shown whenever a record ID does not resolve.
pub const FIND_ID_HINT: &str = "Run `moodlog list` to find record IDs.";

/// Shortest ID prefix shown in tables.
pub const MIN_SHORT_ID_LEN: usize = 8;

/// Widest content column in list tables before truncation.
pub const CONTENT_PREVIEW_LEN: usize = 60;
