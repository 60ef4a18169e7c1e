//! Export and import of record documents.
//!
//! Export writes the whole store as an indented JSON array. Import accepts
//! any JSON array and keeps each element that can be normalized into a valid
//! record; everything else is skipped without individual reporting.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::record::{generate_id, parse_date, Record, MAX_MOOD, MIN_MOOD};

/// Default file name for exported documents.
pub const EXPORT_FILE_NAME: &str = "moodRecords.json";

/// Reasons an import document is rejected as a whole.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The document is not valid JSON
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is JSON but not an array
    #[error("JSON must be an array of records")]
    NotAnArray,
}

/// Records accepted from an import document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBatch {
    pub records: Vec<Record>,
    /// Elements dropped by validation
    pub skipped: usize,
}

impl ImportBatch {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Aggregate result of an import, the only thing reported to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

impl ImportReport {
    pub fn status_message(&self) -> String {
        if self.imported == 0 {
            "no valid records found".to_string()
        } else {
            format!("{} records imported", self.imported)
        }
    }
}

/// Serialize records as an indented JSON array.
pub fn export_document(records: &[Record]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// Parse and validate an import document.
pub fn parse_import(document: &str) -> Result<ImportBatch, TransferError> {
    let value: Value = serde_json::from_str(document)?;
    let Value::Array(elements) = value else {
        return Err(TransferError::NotAnArray);
    };
    Ok(normalize_elements(&elements))
}

/// Normalize every element, counting the ones that fail.
pub(crate) fn normalize_elements(elements: &[Value]) -> ImportBatch {
    let mut batch = ImportBatch::default();
    for element in elements {
        match normalize_element(element) {
            Some(record) => batch.records.push(record),
            None => batch.skipped += 1,
        }
    }
    batch
}

/// Build a record from a loosely-typed JSON element.
///
/// Missing `time` becomes empty, missing `completed` becomes false, a missing
/// `id` is generated. `date`, `content` and `mood` are required.
fn normalize_element(element: &Value) -> Option<Record> {
    let Value::Object(fields) = element else {
        return None;
    };

    let date = string_field(fields, "date");
    let content = string_field(fields, "content");
    if date.is_empty() || content.trim().is_empty() {
        return None;
    }
    let date = parse_date(&date).ok()?;

    let mood = fields.get("mood").and_then(lenient_int)?;
    if !(i64::from(MIN_MOOD)..=i64::from(MAX_MOOD)).contains(&mood) {
        return None;
    }

    let id = match fields.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        _ => generate_id(),
    };

    Some(Record {
        id,
        date,
        time: string_field(fields, "time"),
        content,
        mood: mood as u8,
        completed: fields.get("completed").is_some_and(truthy),
    })
}

/// A string field, or empty when missing or not a string.
fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(value)) => value.clone(),
        _ => String::new(),
    }
}

/// Integer value of a number, or of the leading digits of its text form.
///
/// Numbers truncate toward zero; `"4 stars"` reads as 4; `"0x3"` reads as
/// hex; `[4]` reads through its joined text; `"abc"` has no value.
fn lenient_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => leading_int(s),
        Value::Array(items) => leading_int(&joined_text(items)),
        _ => None,
    }
}

fn leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (radix, digits) = match rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        Some(hex) => (16, hex),
        None => (10, rest),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    i64::from_str_radix(&digits[..end], radix)
        .ok()
        .map(|n| sign * n)
}

/// Comma-joined text of an array, with null elements as empty text.
fn joined_text(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Array(inner) => joined_text(inner),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Truthiness coercion for the completion flag.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_array() {
        let err = parse_import(r#"{"date":"2024-01-01"}"#).unwrap_err();
        assert!(matches!(err, TransferError::NotAnArray));
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = parse_import("[{").unwrap_err();
        assert!(matches!(err, TransferError::Json(_)));
    }

    #[test]
    fn test_unparseable_mood_is_skipped() {
        let batch = parse_import(r#"[{"date":"2024-02-01","content":"x","mood":"abc"}]"#).unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.skipped, 1);
        let report = ImportReport {
            imported: batch.records.len(),
            skipped: batch.skipped,
        };
        assert_eq!(report.status_message(), "no valid records found");
    }

    #[test]
    fn test_hex_and_array_moods_are_imported() {
        let document = json!([
            {"date": "2024-02-01", "content": "hex", "mood": "0x3"},
            {"date": "2024-02-02", "content": "boxed", "mood": [4]}
        ]);
        let batch = parse_import(&document.to_string()).unwrap();

        assert_eq!(batch.skipped, 0);
        assert_eq!(batch.records[0].mood, 3);
        assert_eq!(batch.records[1].mood, 4);
    }

    #[test]
    fn test_defaults_optional_fields() {
        let batch = parse_import(r#"[{"date":"2024-02-01","content":"x","mood":4}]"#).unwrap();
        let record = &batch.records[0];

        assert!(!record.id.is_empty());
        assert_eq!(record.time, "");
        assert!(!record.completed);
        assert_eq!(record.mood, 4);
    }

    #[test]
    fn test_keeps_existing_id_and_time() {
        let batch = parse_import(
            r#"[{"id":"keep-me","date":"2024-02-01","time":"21:10","content":"x","mood":"2","completed":true}]"#,
        )
        .unwrap();
        let record = &batch.records[0];
        assert_eq!(record.id, "keep-me");
        assert_eq!(record.time, "21:10");
        assert_eq!(record.mood, 2);
        assert!(record.completed);
    }

    #[test]
    fn test_skips_invalid_elements_and_keeps_valid_ones() {
        let document = json!([
            "not an object",
            null,
            {"content": "no date", "mood": 3},
            {"date": "2024-02-01", "mood": 3},
            {"date": "2024-02-01", "content": "   ", "mood": 3},
            {"date": "2024-02-01", "content": "zero", "mood": 0},
            {"date": "2024-02-01", "content": "too high", "mood": 7},
            {"date": "02/01/2024", "content": "bad date", "mood": 3},
            {"date": "2024-02-01", "content": "valid", "mood": 5}
        ]);
        let batch = parse_import(&document.to_string()).unwrap();

        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].content, "valid");
        assert_eq!(batch.skipped, 8);
    }

    #[test]
    fn test_lenient_int() {
        assert_eq!(lenient_int(&json!(4)), Some(4));
        assert_eq!(lenient_int(&json!(3.9)), Some(3));
        assert_eq!(lenient_int(&json!("4 stars")), Some(4));
        assert_eq!(lenient_int(&json!("  2")), Some(2));
        assert_eq!(lenient_int(&json!("-1")), Some(-1));
        assert_eq!(lenient_int(&json!("abc")), None);
        assert_eq!(lenient_int(&json!(true)), None);
        assert_eq!(lenient_int(&json!(null)), None);
        assert_eq!(lenient_int(&json!("0x3")), Some(3));
        assert_eq!(lenient_int(&json!("0Xg")), None);
        assert_eq!(lenient_int(&json!([4])), Some(4));
        assert_eq!(lenient_int(&json!(["2", 9])), Some(2));
        assert_eq!(lenient_int(&json!([])), None);
        assert_eq!(lenient_int(&json!({"mood": 3})), None);
    }

    #[test]
    fn test_completed_truthiness() {
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("yes")));
        assert!(truthy(&json!([])));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!(null)));
    }

    #[test]
    fn test_export_is_indented_and_parses_back() {
        let batch = parse_import(r#"[{"id":"a","date":"2024-02-01","content":"x","mood":4}]"#)
            .unwrap();
        let exported = export_document(&batch.records).unwrap();

        assert!(exported.contains("\n  {"));
        let again = parse_import(&exported).unwrap();
        assert_eq!(again.records, batch.records);
    }

    #[test]
    fn test_report_message_counts() {
        let report = ImportReport {
            imported: 3,
            skipped: 1,
        };
        assert_eq!(report.status_message(), "3 records imported");
    }
}
