//! Aggregate mood metrics over the whole store.

use serde::Serialize;

use crate::record::{Record, MAX_MOOD, MIN_MOOD};
use crate::store::RecordStore;

/// Placeholder rendered for a metric with no data.
pub const NO_DATA: &str = "-";

/// Count of records per mood rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Distribution {
    counts: [usize; MAX_MOOD as usize],
}

impl Distribution {
    fn add(&mut self, mood: u8) {
        if let Some(slot) = Self::slot(mood) {
            self.counts[slot] += 1;
        }
    }

    fn slot(mood: u8) -> Option<usize> {
        (MIN_MOOD..=MAX_MOOD)
            .contains(&mood)
            .then(|| usize::from(mood - MIN_MOOD))
    }

    /// Records with this rating (0 for ratings outside the scale).
    pub fn count(&self, mood: u8) -> usize {
        Self::slot(mood).map_or(0, |slot| self.counts[slot])
    }

    /// Largest bucket.
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Bar length for a rating relative to the largest bucket, in `0.0..=1.0`.
    pub fn bar_ratio(&self, mood: u8) -> f64 {
        let max = self.max_count();
        if max == 0 {
            return 0.0;
        }
        self.count(mood) as f64 / max as f64
    }

    /// `(rating, count)` pairs from lowest to highest rating.
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        (MIN_MOOD..=MAX_MOOD).map(move |mood| (mood, self.count(mood)))
    }
}

/// Summary metrics. Every metric is `None` for an empty store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub count: usize,
    pub mean: Option<f64>,
    /// Most frequent rating; ties go to the lowest rating
    pub mode: Option<u8>,
    /// Population standard deviation (divides by N)
    pub std_dev: Option<f64>,
    pub min: Option<u8>,
    pub max: Option<u8>,
    pub distribution: Distribution,
}

impl Statistics {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Compute statistics over every record in the store.
pub fn statistics(store: &RecordStore) -> Statistics {
    statistics_of(store.records())
}

/// Compute statistics over a slice of records.
pub fn statistics_of(records: &[Record]) -> Statistics {
    let mut distribution = Distribution::default();
    for record in records {
        distribution.add(record.mood);
    }

    let count = records.len();
    if count == 0 {
        return Statistics {
            count,
            mean: None,
            mode: None,
            std_dev: None,
            min: None,
            max: None,
            distribution,
        };
    }

    let n = count as f64;
    let sum: f64 = records.iter().map(|r| f64::from(r.mood)).sum();
    let mean = sum / n;
    let variance = records
        .iter()
        .map(|r| (f64::from(r.mood) - mean).powi(2))
        .sum::<f64>()
        / n;

    // Strictly-greater keeps the first (lowest) rating on ties.
    let mut mode = None;
    let mut best = 0;
    for (mood, bucket) in distribution.iter() {
        if bucket > best {
            best = bucket;
            mode = Some(mood);
        }
    }

    Statistics {
        count,
        mean: Some(mean),
        mode,
        std_dev: Some(variance.sqrt()),
        min: records.iter().map(|r| r.mood).min(),
        max: records.iter().map(|r| r.mood).max(),
        distribution,
    }
}

/// Round to two decimals, ties away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render a metric with two decimals, or the no-data placeholder.
pub fn format_metric(value: Option<f64>) -> String {
    value.map_or_else(|| NO_DATA.to_string(), |v| format!("{:.2}", round2(v)))
}

/// Render a rating, or the no-data placeholder.
pub fn format_rating(value: Option<u8>) -> String {
    value.map_or_else(|| NO_DATA.to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_date;

    fn records(moods: &[u8]) -> Vec<Record> {
        moods
            .iter()
            .enumerate()
            .map(|(i, mood)| Record {
                id: i.to_string(),
                date: parse_date("2024-01-01").unwrap(),
                time: String::new(),
                content: "x".to_string(),
                mood: *mood,
                completed: false,
            })
            .collect()
    }

    #[test]
    fn test_empty_store_has_no_data() {
        let stats = statistics(&RecordStore::new());

        assert!(stats.is_empty());
        assert_eq!(stats.mean, None);
        assert_eq!(stats.mode, None);
        assert_eq!(stats.std_dev, None);
        assert_eq!(stats.min, None);
        assert_eq!(stats.max, None);
        assert_eq!(stats.distribution.max_count(), 0);
        assert_eq!(stats.distribution.bar_ratio(3), 0.0);
        assert_eq!(format_metric(stats.mean), NO_DATA);
        assert_eq!(format_rating(stats.mode), NO_DATA);
    }

    #[test]
    fn test_two_record_scenario() {
        let stats = statistics_of(&records(&[3, 5]));

        assert_eq!(stats.count, 2);
        assert_eq!(format_metric(stats.mean), "4.00");
        assert_eq!(stats.mode, Some(3));
        assert_eq!(format_metric(stats.std_dev), "1.00");
        assert_eq!(stats.min, Some(3));
        assert_eq!(stats.max, Some(5));
    }

    #[test]
    fn test_mode_tie_goes_to_lowest_rating() {
        let stats = statistics_of(&records(&[5, 2, 5, 2]));
        assert_eq!(stats.mode, Some(2));
    }

    #[test]
    fn test_mode_picks_most_frequent() {
        let stats = statistics_of(&records(&[1, 4, 4, 2]));
        assert_eq!(stats.mode, Some(4));
    }

    #[test]
    fn test_population_std_dev() {
        let stats = statistics_of(&records(&[2, 4, 4, 4, 5, 5, 5, 3]));
        // mean 4, squared deviations sum 8, /8 = 1
        assert_eq!(format_metric(stats.mean), "4.00");
        assert_eq!(format_metric(stats.std_dev), "1.00");
    }

    #[test]
    fn test_metric_ties_round_up() {
        let stats = statistics_of(&records(&[1, 2, 2, 2, 2, 2, 3, 3]));
        assert_eq!(stats.mean, Some(2.125));
        assert_eq!(format_metric(stats.mean), "2.13");
        assert_eq!(round2(2.125), 2.13);
    }

    #[test]
    fn test_distribution_normalized_to_max_bucket() {
        let stats = statistics_of(&records(&[1, 1, 1, 1, 3, 3, 5]));
        let dist = stats.distribution;

        assert_eq!(dist.count(1), 4);
        assert_eq!(dist.count(2), 0);
        assert_eq!(dist.bar_ratio(1), 1.0);
        assert_eq!(dist.bar_ratio(3), 0.5);
        assert_eq!(dist.bar_ratio(5), 0.25);
        assert_eq!(dist.count(9), 0);
        let pairs: Vec<(u8, usize)> = dist.iter().collect();
        assert_eq!(pairs, vec![(1, 4), (2, 0), (3, 2), (4, 0), (5, 1)]);
    }

    #[test]
    fn test_statistics_serialize_distribution_as_array() {
        let value = serde_json::to_value(statistics_of(&records(&[2]))).unwrap();
        assert_eq!(value["distribution"], serde_json::json!([0, 1, 0, 0, 0]));
        assert_eq!(value["count"], 1);
    }
}
