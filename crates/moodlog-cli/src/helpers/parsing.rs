//! Parsing helpers for dates, times, moods, sort modes and output format.

use chrono::{Local, NaiveDate};

use moodlog_core::record::{parse_date, parse_mood, parse_time, TIME_FORMAT};
use moodlog_core::{Criteria, SortMode};

use crate::cli::FilterArgs;
use crate::errors::CliError;

/// Parse a `--date` value, defaulting to today.
pub fn parse_date_or_today(value: Option<&str>) -> anyhow::Result<NaiveDate> {
    match value {
        Some(value) => Ok(parse_date(value)?),
        None => Ok(Local::now().date_naive()),
    }
}

/// Parse a `--time` value into canonical `HH:MM`. Empty clears the time.
pub fn parse_time_arg(value: &str) -> anyhow::Result<String> {
    if value.trim().is_empty() {
        return Ok(String::new());
    }
    let time = parse_time(value).ok_or_else(|| {
        CliError::invalid_input(format!("Invalid time (expected HH:MM): {}", value))
    })?;
    Ok(time.format(TIME_FORMAT).to_string())
}

/// Parse a `--mood` value (1-5).
pub fn parse_mood_arg(value: &str) -> anyhow::Result<u8> {
    Ok(parse_mood(value)?)
}

/// Parse a `--sort` value, falling back to `default`.
pub fn parse_sort(value: Option<&str>, default: SortMode) -> anyhow::Result<SortMode> {
    match value {
        Some(value) => Ok(value.parse()?),
        None => Ok(default),
    }
}

/// Apply filter flags on top of existing criteria. Unset flags keep `base`.
pub fn apply_filter(base: Criteria, filter: &FilterArgs) -> anyhow::Result<Criteria> {
    let mut criteria = base;
    if let Some(search) = &filter.search {
        criteria = criteria.search(search.clone());
    }
    if let Some(mood) = &filter.mood {
        criteria = criteria.mood(parse_mood_arg(mood)?);
    }
    if let Some(from) = &filter.from {
        criteria = criteria.since(parse_date(from)?);
    }
    if let Some(to) = &filter.to {
        criteria = criteria.until(parse_date(to)?);
    }
    if let (Some(from), Some(to)) = (criteria.from, criteria.to) {
        if from > to {
            return Err(CliError::invalid_input(format!(
                "--from ({}) is after --to ({})",
                from, to
            ))
            .into());
        }
    }
    Ok(criteria)
}

/// Short human description of the active filters, e.g. `search "walk", mood 5`.
pub fn describe_criteria(criteria: &Criteria) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(search) = &criteria.search {
        parts.push(format!("search \"{}\"", search.trim()));
    }
    if let Some(mood) = criteria.mood {
        parts.push(format!("mood {}", mood));
    }
    match (criteria.from, criteria.to) {
        (Some(from), Some(to)) => parts.push(format!("{}..{}", from, to)),
        (Some(from), None) => parts.push(format!("from {}", from)),
        (None, Some(to)) => parts.push(format!("to {}", to)),
        (None, None) => {}
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Table layout requested with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

/// Parse output format string.
pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("table") => Ok(Some(OutputFormat::Table)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(CliError::invalid_input(format!(
            "Unsupported format: {} (use table or plain)",
            other
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_arg_normalizes() {
        assert_eq!(parse_time_arg("7:05").unwrap(), "07:05");
        assert_eq!(parse_time_arg("21:30:59").unwrap(), "21:30");
        assert_eq!(parse_time_arg("").unwrap(), "");
        assert!(parse_time_arg("late").is_err());
    }

    #[test]
    fn test_parse_date_or_today() {
        let date = parse_date_or_today(Some("2024-02-29")).unwrap();
        assert_eq!(date.to_string(), "2024-02-29");
        assert_eq!(parse_date_or_today(None).unwrap(), Local::now().date_naive());
        assert!(parse_date_or_today(Some("2024-02-30")).is_err());
    }

    #[test]
    fn test_parse_sort_default() {
        assert_eq!(parse_sort(None, SortMode::MoodAsc).unwrap(), SortMode::MoodAsc);
        assert_eq!(
            parse_sort(Some("date-asc"), SortMode::MoodAsc).unwrap(),
            SortMode::DateAsc
        );
        assert!(parse_sort(Some("random"), SortMode::DateDesc).is_err());
    }

    #[test]
    fn test_apply_filter_keeps_base_for_unset_flags() {
        let base = Criteria::new().mood(3).sort(SortMode::MoodDesc);
        let filter = FilterArgs {
            search: Some("walk".to_string()),
            ..FilterArgs::default()
        };
        let criteria = apply_filter(base, &filter).unwrap();
        assert_eq!(criteria.mood, Some(3));
        assert_eq!(criteria.search.as_deref(), Some("walk"));
        assert_eq!(criteria.sort, SortMode::MoodDesc);
    }

    #[test]
    fn test_apply_filter_rejects_inverted_range() {
        let filter = FilterArgs {
            from: Some("2024-02-01".to_string()),
            to: Some("2024-01-01".to_string()),
            ..FilterArgs::default()
        };
        assert!(apply_filter(Criteria::new(), &filter).is_err());
    }

    #[test]
    fn test_describe_criteria() {
        assert_eq!(describe_criteria(&Criteria::new()), None);
        let criteria = Criteria::new()
            .search("walk")
            .mood(5)
            .since(parse_date("2024-01-01").unwrap());
        assert_eq!(
            describe_criteria(&criteria).as_deref(),
            Some("search \"walk\", mood 5, from 2024-01-01")
        );
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format(None).unwrap(), None);
        assert_eq!(
            parse_output_format(Some("plain")).unwrap(),
            Some(OutputFormat::Plain)
        );
        assert!(parse_output_format(Some("csv")).is_err());
    }
}
