//! Prompts, confirmations and file input.

use std::io::{self, IsTerminal};
use std::path::Path;

use dialoguer::{Confirm, Input};

use moodlog_core::record::{parse_mood, MAX_MOOD, MIN_MOOD};

use crate::errors::CliError;
use crate::ui::UiContext;

/// Ask before a destructive action.
///
/// `yes` and a disabled `[ui] confirm` skip the prompt. Without a terminal the
/// action is refused unless `--yes` was given.
pub fn confirm(ui: &UiContext, prompt: &str, yes: bool, enabled: bool) -> anyhow::Result<bool> {
    if yes || !enabled {
        return Ok(true);
    }
    if !ui.is_interactive() {
        return Err(CliError::invalid_input(format!(
            "{} (refusing without --yes on a non-interactive terminal)",
            prompt.trim_end_matches('?')
        ))
        .into());
    }
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Content for `add`: the flag value, else a prompt on a terminal.
pub fn content_or_prompt(value: Option<&str>) -> anyhow::Result<String> {
    if let Some(value) = value {
        return Ok(value.to_string());
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::invalid_input("--content is required").into());
    }
    let content: String = Input::new()
        .with_prompt("What happened?")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Content cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(content)
}

/// Mood for `add`: the flag value, else a prompt on a terminal.
pub fn mood_or_prompt(value: Option<&str>) -> anyhow::Result<u8> {
    if let Some(value) = value {
        return Ok(parse_mood(value)?);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::invalid_input("--mood is required").into());
    }
    let mood: String = Input::new()
        .with_prompt(format!("Mood ({}-{})", MIN_MOOD, MAX_MOOD))
        .validate_with(|input: &String| -> Result<(), String> {
            parse_mood(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(parse_mood(&mood)?)
}

/// Read an import document; a missing file is a not-found error.
pub fn read_import_file(path: &str) -> anyhow::Result<String> {
    let file = Path::new(path);
    if !file.exists() {
        return Err(CliError::not_found(
            format!("Import file not found: {}", path),
            "Pass the path of a JSON file exported by `moodlog export`.",
        )
        .into());
    }
    Ok(std::fs::read_to_string(file)?)
}

/// Split a shell line into words. Single and double quotes group words;
/// a backslash escapes the next character outside single quotes.
pub fn split_command_line(line: &str) -> anyhow::Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    in_word = true;
                }
            }
            (Some(_), c) => current.push(c),
            (None, '"') | (None, '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(CliError::invalid_input("Unterminated quote").into());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;

    fn plain_ui() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    #[test]
    fn test_confirm_skipped_with_yes_or_disabled() {
        assert!(confirm(&plain_ui(), "Delete?", true, true).unwrap());
        assert!(confirm(&plain_ui(), "Delete?", false, false).unwrap());
    }

    #[test]
    fn test_confirm_refuses_without_terminal() {
        let err = confirm(&plain_ui(), "Delete record?", false, true).unwrap_err();
        assert!(err.to_string().contains("--yes"));
    }

    #[test]
    fn test_split_plain_words() {
        assert_eq!(
            split_command_line("  list   --mood 4 ").unwrap(),
            vec!["list", "--mood", "4"]
        );
        assert!(split_command_line("   ").unwrap().is_empty());
    }

    #[test]
    fn test_split_quotes_and_escapes() {
        assert_eq!(
            split_command_line(r#"add -c "long walk" -m 4"#).unwrap(),
            vec!["add", "-c", "long walk", "-m", "4"]
        );
        assert_eq!(
            split_command_line(r#"add -c 'it\'s'"#).unwrap_err().to_string(),
            "Unterminated quote"
        );
        assert_eq!(
            split_command_line(r#"add -c it\'s -c """#).unwrap(),
            vec!["add", "-c", "it's", "-c", ""]
        );
    }

    #[test]
    fn test_split_unterminated_quote() {
        assert!(split_command_line("add -c \"open").is_err());
    }

    #[test]
    fn test_read_import_file_missing() {
        let err = read_import_file("/nonexistent/moodRecords.json").unwrap_err();
        let cli_err = err.downcast_ref::<CliError>().unwrap();
        assert_eq!(cli_err.exit_code(), crate::constants::exit_codes::NOT_FOUND);
    }
}
