//! JSON output formatting for records and statistics.

use moodlog_core::stats::round2;
use moodlog_core::{Record, Statistics};

/// Convert a record to JSON for output.
pub fn record_json(record: &Record) -> serde_json::Value {
    serde_json::json!({
        "id": record.id,
        "date": record.date.to_string(),
        "time": record.time,
        "content": record.content,
        "mood": record.mood,
        "completed": record.completed,
    })
}

/// Convert multiple records to a JSON array for output.
pub fn records_json<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<serde_json::Value> {
    records.into_iter().map(record_json).collect()
}

/// Convert statistics to JSON. Metrics with no data are `null`.
pub fn statistics_json(stats: &Statistics) -> serde_json::Value {
    let distribution: serde_json::Map<String, serde_json::Value> = stats
        .distribution
        .iter()
        .map(|(mood, count)| (mood.to_string(), serde_json::Value::from(count)))
        .collect();
    serde_json::json!({
        "count": stats.count,
        "mean": stats.mean.map(round2),
        "mode": stats.mode,
        "std_dev": stats.std_dev.map(round2),
        "min": stats.min,
        "max": stats.max,
        "distribution": distribution,
    })
}
