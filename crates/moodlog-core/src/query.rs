//! Filtered, sorted views over the record store.
//!
//! `view` is pure: it borrows the store and returns references in display
//! order without touching the underlying insertion order.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::MoodlogError;
use crate::record::Record;
use crate::store::RecordStore;

/// Display ordering for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Newest date and time first
    #[default]
    DateDesc,
    /// Oldest date and time first
    DateAsc,
    /// Highest mood first
    MoodDesc,
    /// Lowest mood first
    MoodAsc,
    /// Store order
    #[serde(rename = "none")]
    Unsorted,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::DateDesc,
        SortMode::DateAsc,
        SortMode::MoodDesc,
        SortMode::MoodAsc,
        SortMode::Unsorted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::DateDesc => "date-desc",
            SortMode::DateAsc => "date-asc",
            SortMode::MoodDesc => "mood-desc",
            SortMode::MoodAsc => "mood-asc",
            SortMode::Unsorted => "none",
        }
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortMode::DateDesc => timestamp(b).cmp(&timestamp(a)),
            SortMode::DateAsc => timestamp(a).cmp(&timestamp(b)),
            SortMode::MoodDesc => b.mood.cmp(&a.mood),
            SortMode::MoodAsc => a.mood.cmp(&b.mood),
            SortMode::Unsorted => Ordering::Equal,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = MoodlogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == value.trim())
            .ok_or_else(|| {
                MoodlogError::InvalidInput(format!(
                    "Unknown sort mode: {} (use date-desc, date-asc, mood-desc, mood-asc or none)",
                    value
                ))
            })
    }
}

/// Filter and sort criteria. Every filter is optional; set filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Case-insensitive substring of the content
    pub search: Option<String>,

    /// Exact mood rating
    pub mood: Option<u8>,

    /// Start date (inclusive)
    pub from: Option<NaiveDate>,

    /// End date (inclusive)
    pub to: Option<NaiveDate>,

    /// Display ordering
    pub sort: SortMode,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text. Blank text clears the filter.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    pub fn mood(mut self, mood: u8) -> Self {
        self.mood = Some(mood);
        self
    }

    pub fn since(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    pub fn until(mut self, date: NaiveDate) -> Self {
        self.to = Some(date);
        self
    }

    pub fn sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// True when any filter (not the sort) is set.
    pub fn is_active(&self) -> bool {
        self.search.is_some() || self.mood.is_some() || self.from.is_some() || self.to.is_some()
    }

    /// Drop every filter, keeping the sort.
    pub fn reset(&mut self) {
        *self = Self::new().sort(self.sort);
    }

    /// Trimmed, lowercased search needle.
    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }
}

/// Does the record pass every filter in `criteria`?
pub fn matches(record: &Record, criteria: &Criteria) -> bool {
    if let Some(needle) = criteria.needle() {
        if !record.content.to_lowercase().contains(&needle) {
            return false;
        }
    }
    if let Some(mood) = criteria.mood {
        if record.mood != mood {
            return false;
        }
    }
    if let Some(from) = criteria.from {
        if record.date < from {
            return false;
        }
    }
    if let Some(to) = criteria.to {
        if record.date > to {
            return false;
        }
    }
    true
}

/// Compute the filtered, sorted view. Ties keep store order.
pub fn view<'a>(store: &'a RecordStore, criteria: &Criteria) -> Vec<&'a Record> {
    let mut records: Vec<&Record> = store.iter().filter(|r| matches(r, criteria)).collect();
    records.sort_by(|a, b| criteria.sort.compare(a, b));
    records
}

/// Byte ranges of case-insensitive, non-overlapping matches of `needle`.
///
/// Used to highlight search hits; ranges always fall on char boundaries.
pub fn match_ranges(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = needle.trim().chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    while start < haystack.len() {
        let rest = &haystack[start..];
        match match_len(rest, &needle) {
            Some(len) => {
                ranges.push(start..start + len);
                start += len;
            }
            None => start += rest.chars().next().map_or(1, char::len_utf8),
        }
    }
    ranges
}

fn match_len(rest: &str, needle: &[char]) -> Option<usize> {
    let mut lowered: Vec<char> = Vec::with_capacity(needle.len());
    for (offset, ch) in rest.char_indices() {
        lowered.extend(ch.to_lowercase());
        if lowered.len() >= needle.len() {
            return (lowered == needle).then_some(offset + ch.len_utf8());
        }
        if lowered[..] != needle[..lowered.len()] {
            return None;
        }
    }
    None
}

fn timestamp(record: &Record) -> NaiveDateTime {
    record.date.and_time(record.sort_time())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_date;

    fn record(id: &str, date: &str, time: &str, content: &str, mood: u8) -> Record {
        Record {
            id: id.to_string(),
            date: parse_date(date).unwrap(),
            time: time.to_string(),
            content: content.to_string(),
            mood,
            completed: false,
        }
    }

    fn sample_store() -> RecordStore {
        RecordStore::from_records(vec![
            record("a", "2024-01-02", "09:00", "Great walk", 5),
            record("b", "2024-01-01", "", "ok day", 3),
            record("c", "2024-01-02", "18:30", "tired", 2),
            record("d", "2024-01-03", "07:00", "WALKED again", 4),
        ])
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_default_sort_is_date_desc_with_time_tiebreak() {
        let store = sample_store();
        let records = view(&store, &Criteria::new());
        assert_eq!(ids(&records), vec!["d", "c", "a", "b"]);
    }

    #[test]
    fn test_date_asc_treats_missing_time_as_midnight() {
        let store = RecordStore::from_records(vec![
            record("late", "2024-01-01", "00:01", "x", 1),
            record("none", "2024-01-01", "", "y", 1),
        ]);
        let records = view(&store, &Criteria::new().sort(SortMode::DateAsc));
        assert_eq!(ids(&records), vec!["none", "late"]);
    }

    #[test]
    fn test_mood_sorts_are_stable() {
        let store = RecordStore::from_records(vec![
            record("a", "2024-01-01", "", "x", 3),
            record("b", "2024-01-02", "", "y", 5),
            record("c", "2024-01-03", "", "z", 3),
        ]);
        let desc = view(&store, &Criteria::new().sort(SortMode::MoodDesc));
        assert_eq!(ids(&desc), vec!["b", "a", "c"]);
        let asc = view(&store, &Criteria::new().sort(SortMode::MoodAsc));
        assert_eq!(ids(&asc), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_unsorted_passes_store_order_through() {
        let store = sample_store();
        let records = view(&store, &Criteria::new().sort(SortMode::Unsorted));
        assert_eq!(ids(&records), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let store = sample_store();
        let records = view(
            &store,
            &Criteria::new().search("  walk ").sort(SortMode::Unsorted),
        );
        assert_eq!(ids(&records), vec!["a", "d"]);
    }

    #[test]
    fn test_mood_filter_leaves_store_untouched() {
        let store = RecordStore::from_records(vec![
            record("five", "2024-01-01", "", "great", 5),
            record("three", "2024-01-02", "", "ok", 3),
        ]);
        let before = store.clone();

        let records = view(&store, &Criteria::new().mood(5));

        assert_eq!(ids(&records), vec!["five"]);
        assert_eq!(store, before);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let store = sample_store();
        let criteria = Criteria::new()
            .since(parse_date("2024-01-02").unwrap())
            .until(parse_date("2024-01-02").unwrap())
            .sort(SortMode::Unsorted);
        assert_eq!(ids(&view(&store, &criteria)), vec!["a", "c"]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let store = sample_store();
        let criteria = Criteria::new()
            .search("walk")
            .mood(4)
            .since(parse_date("2024-01-01").unwrap());
        assert_eq!(ids(&view(&store, &criteria)), vec!["d"]);
    }

    #[test]
    fn test_view_is_idempotent() {
        let store = sample_store();
        let criteria = Criteria::new().search("a").sort(SortMode::MoodAsc);
        assert_eq!(view(&store, &criteria), view(&store, &criteria));
    }

    #[test]
    fn test_blank_search_is_inactive() {
        let criteria = Criteria::new().search("   ");
        assert!(criteria.search.is_none());
        assert!(!criteria.is_active());
        assert!(Criteria::new().mood(2).is_active());
    }

    #[test]
    fn test_reset_clears_filters_and_keeps_sort() {
        let mut criteria = Criteria::new()
            .search("walk")
            .mood(4)
            .sort(SortMode::MoodAsc);
        criteria.reset();

        assert!(!criteria.is_active());
        assert_eq!(criteria.sort, SortMode::MoodAsc);
    }

    #[test]
    fn test_sort_mode_parse() {
        for mode in SortMode::ALL {
            assert_eq!(mode.as_str().parse::<SortMode>().unwrap(), mode);
        }
        assert!("sideways".parse::<SortMode>().is_err());
    }

    #[test]
    fn test_match_ranges() {
        assert_eq!(match_ranges("Walk and walk", "WALK"), vec![0..4, 9..13]);
        assert!(match_ranges("anything", "  ").is_empty());
        assert!(match_ranges("abc", "abcd").is_empty());
    }

    #[test]
    fn test_match_ranges_multibyte() {
        let text = "今日は散歩。散歩!";
        let ranges = match_ranges(text, "散歩");
        assert_eq!(ranges.len(), 2);
        for range in ranges {
            assert_eq!(&text[range], "散歩");
        }
    }
}
