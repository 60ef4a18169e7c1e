//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use moodlog_core::MoodlogError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (record, import file)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\nHint: {}", message, hint)
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Exit code for any error surfacing from a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    match err.downcast_ref::<MoodlogError>() {
        Some(MoodlogError::NotFound(_)) => exit_codes::NOT_FOUND,
        Some(
            MoodlogError::Validation(_)
            | MoodlogError::InvalidInput(_)
            | MoodlogError::Transfer(_),
        ) => exit_codes::INVALID_INPUT,
        _ => exit_codes::GENERAL,
    }
}

/// Split a rendered error into its message and the text after "Hint:".
pub fn split_hint(message: &str) -> (&str, Option<&str>) {
    match message.find("\nHint:") {
        Some(idx) => (
            &message[..idx],
            Some(message[idx + "\nHint:".len()..].trim()),
        ),
        None => (message, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_includes_hint() {
        let err = CliError::not_found("Record not found: abc", "Run `moodlog list`.");
        assert_eq!(err.to_string(), "Record not found: abc\nHint: Run `moodlog list`.");
        assert_eq!(err.exit_code(), exit_codes::NOT_FOUND);
    }

    #[test]
    fn test_exit_codes_for_core_errors() {
        let validation = anyhow::Error::new(MoodlogError::Validation("x".into()));
        assert_eq!(exit_code_for(&validation), exit_codes::INVALID_INPUT);

        let missing = anyhow::Error::new(MoodlogError::NotFound("x".into()));
        assert_eq!(exit_code_for(&missing), exit_codes::NOT_FOUND);

        let storage = anyhow::Error::new(MoodlogError::Storage("x".into()));
        assert_eq!(exit_code_for(&storage), exit_codes::GENERAL);

        let cli = anyhow::Error::new(CliError::invalid_input("bad"));
        assert_eq!(exit_code_for(&cli), exit_codes::INVALID_INPUT);

        assert_eq!(exit_code_for(&anyhow::anyhow!("other")), exit_codes::GENERAL);
    }

    #[test]
    fn test_split_hint() {
        let err = CliError::not_found("Record not found: abc", "Run `moodlog list`.");
        let rendered = err.to_string();
        assert_eq!(
            split_hint(&rendered),
            ("Record not found: abc", Some("Run `moodlog list`."))
        );
        assert_eq!(split_hint("plain failure"), ("plain failure", None));
    }
}
