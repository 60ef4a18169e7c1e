//! The journal record and the inputs used to create or change one.

use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MoodlogError, Result};

/// Lowest mood rating.
pub const MIN_MOOD: u8 = 1;

/// Highest mood rating.
pub const MAX_MOOD: u8 = 5;

/// Calendar date format used for storage, filtering and input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time-of-day format stamped onto new records.
pub const TIME_FORMAT: &str = "%H:%M";

/// One journal entry.
///
/// Serialized field names match the persisted document exactly:
/// `id`, `date`, `time`, `content`, `mood`, `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier (empty only for legacy data before load repairs it)
    #[serde(default)]
    pub id: String,

    /// Calendar date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,

    /// Time of day (`HH:MM`), empty when unknown
    #[serde(default)]
    pub time: String,

    /// Free text, never blank
    pub content: String,

    /// Mood rating in `MIN_MOOD..=MAX_MOOD`
    pub mood: u8,

    /// Completion flag
    #[serde(default)]
    pub completed: bool,
}

impl Record {
    /// Time of day used for ordering; missing or malformed times sort as midnight.
    pub fn sort_time(&self) -> NaiveTime {
        parse_time(&self.time).unwrap_or(NaiveTime::MIN)
    }

    /// Check the record invariants.
    pub fn validate(&self) -> Result<()> {
        validate_content(&self.content)?;
        validate_mood(self.mood)?;
        Ok(())
    }
}

/// Generate a fresh record identifier.
///
/// UUIDv7: a millisecond timestamp prefix followed by random bits.
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

/// Builder for creating new records.
#[derive(Debug, Clone)]
pub struct NewRecord {
    /// Calendar date
    pub date: NaiveDate,

    /// Explicit time of day; `None` stamps the current local time
    pub time: Option<String>,

    /// Free text
    pub content: String,

    /// Mood rating
    pub mood: u8,

    /// Completion flag
    pub completed: bool,
}

impl NewRecord {
    pub fn new(date: NaiveDate, content: impl Into<String>, mood: u8) -> Self {
        Self {
            date,
            time: None,
            content: content.into(),
            mood,
            completed: false,
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Validate the builder without consuming it.
    pub fn validate(&self) -> Result<()> {
        validate_content(&self.content)?;
        validate_mood(self.mood)?;
        if let Some(time) = &self.time {
            validate_time(time)?;
        }
        Ok(())
    }

    /// Build the record under the given id. Content is trimmed.
    pub(crate) fn into_record(self, id: String) -> Record {
        let time = self
            .time
            .unwrap_or_else(|| Local::now().format(TIME_FORMAT).to_string());
        Record {
            id,
            date: self.date,
            time,
            content: self.content.trim().to_string(),
            mood: self.mood,
            completed: self.completed,
        }
    }
}

/// Field changes applied by an edit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub content: Option<String>,
    pub mood: Option<u8>,
    pub completed: Option<bool>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn mood(mut self, mood: u8) -> Self {
        self.mood = Some(mood);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Validate every field the patch sets.
    pub fn validate(&self) -> Result<()> {
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        if let Some(mood) = self.mood {
            validate_mood(mood)?;
        }
        if let Some(time) = &self.time {
            validate_time(time)?;
        }
        Ok(())
    }

    /// Apply the patch to a record in place.
    pub(crate) fn apply(&self, record: &mut Record) {
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(time) = &self.time {
            record.time = time.clone();
        }
        if let Some(content) = &self.content {
            record.content = content.trim().to_string();
        }
        if let Some(mood) = self.mood {
            record.mood = mood;
        }
        if let Some(completed) = self.completed {
            record.completed = completed;
        }
    }
}

/// A reference to a record in the store.
///
/// `Id` is the normal path. `Fields` resolves by exact (date, time, content)
/// match for callers holding legacy data without an id; with duplicates it
/// resolves to the first match in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRef {
    Id(String),
    Fields {
        date: NaiveDate,
        time: String,
        content: String,
    },
}

impl RecordRef {
    pub fn id(id: impl Into<String>) -> Self {
        RecordRef::Id(id.into())
    }

    /// Reference a record the way it was displayed: by id when it has one.
    pub fn of(record: &Record) -> Self {
        if record.id.is_empty() {
            RecordRef::Fields {
                date: record.date,
                time: record.time.clone(),
                content: record.content.clone(),
            }
        } else {
            RecordRef::Id(record.id.clone())
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            RecordRef::Id(id) => record.id == *id,
            RecordRef::Fields {
                date,
                time,
                content,
            } => record.date == *date && record.time == *time && record.content == *content,
        }
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        MoodlogError::InvalidInput(format!("Invalid date (expected YYYY-MM-DD): {}", value))
    })
}

/// Parse an `HH:MM` or `HH:MM:SS` time of day.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()
}

/// Parse a mood rating from user input.
pub fn parse_mood(value: &str) -> Result<u8> {
    let mood: u8 = value.trim().parse().map_err(|_| {
        MoodlogError::InvalidInput(format!(
            "Invalid mood: {} (expected {}-{})",
            value, MIN_MOOD, MAX_MOOD
        ))
    })?;
    validate_mood(mood)?;
    Ok(mood)
}

fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(MoodlogError::Validation("Content is empty".to_string()));
    }
    Ok(())
}

fn validate_mood(mood: u8) -> Result<()> {
    if !(MIN_MOOD..=MAX_MOOD).contains(&mood) {
        return Err(MoodlogError::Validation(format!(
            "Mood must be between {} and {} (got {})",
            MIN_MOOD, MAX_MOOD, mood
        )));
    }
    Ok(())
}

/// Empty is allowed; anything else must be a time of day.
fn validate_time(time: &str) -> Result<()> {
    if time.is_empty() || parse_time(time).is_some() {
        return Ok(());
    }
    Err(MoodlogError::Validation(format!(
        "Invalid time (expected HH:MM): {}",
        time
    )))
}
