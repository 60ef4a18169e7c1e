//! The ordered, in-memory record store.
//!
//! Insertion order is the canonical order; display order is always a derived
//! view (see `query`). Identity resolution goes through `RecordRef`.

use std::collections::HashSet;

use crate::error::Result;
use crate::record::{generate_id, Record, RecordPatch, RecordRef};

/// Ordered collection of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Parse a persisted or exported document strictly.
    pub fn from_json(document: &str) -> Result<Self> {
        let records: Vec<Record> = serde_json::from_str(document)?;
        Ok(Self { records })
    }

    /// Serialize the whole store as a compact JSON array.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.records)?)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Deep copy of the current records.
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.clone()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Index of the referenced record.
    pub fn position(&self, target: &RecordRef) -> Option<usize> {
        self.records.iter().position(|r| target.matches(r))
    }

    pub fn get(&self, target: &RecordRef) -> Option<&Record> {
        self.position(target).map(|index| &self.records[index])
    }

    pub fn append(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: Vec<Record>) {
        self.records.extend(records);
    }

    /// Apply a patch in place. Returns the updated record, `None` if not found.
    pub fn update(&mut self, target: &RecordRef, patch: &RecordPatch) -> Option<&Record> {
        let index = self.position(target)?;
        let record = &mut self.records[index];
        patch.apply(record);
        Some(record)
    }

    /// Flip the completion flag. Returns the new value, `None` if not found.
    pub fn toggle_completed(&mut self, target: &RecordRef) -> Option<bool> {
        let index = self.position(target)?;
        let record = &mut self.records[index];
        record.completed = !record.completed;
        Some(record.completed)
    }

    /// Remove the referenced record, preserving the order of the rest.
    pub fn remove(&mut self, target: &RecordRef) -> Option<Record> {
        let index = self.position(target)?;
        Some(self.records.remove(index))
    }

    /// Replace every record, returning the previous contents.
    pub fn replace(&mut self, records: Vec<Record>) -> Vec<Record> {
        std::mem::replace(&mut self.records, records)
    }

    /// Assign fresh ids to records with an empty or duplicate id.
    ///
    /// Returns how many ids were assigned. The first holder of an id keeps it.
    pub fn repair_ids(&mut self) -> usize {
        let mut seen = HashSet::new();
        let mut assigned = 0;
        for record in &mut self.records {
            if record.id.is_empty() || !seen.insert(record.id.clone()) {
                record.id = generate_id();
                seen.insert(record.id.clone());
                assigned += 1;
            }
        }
        assigned
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
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

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut store = RecordStore::new();
        store.append(record("b", "2024-01-02", "", "second", 2));
        store.append(record("a", "2024-01-01", "", "first", 1));

        let ids: Vec<&str> = store.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_remove_by_id_ignores_structural_twins() {
        let mut store = RecordStore::from_records(vec![
            record("one", "2024-01-01", "09:00", "same", 3),
            record("two", "2024-01-01", "09:00", "same", 3),
        ]);

        let removed = store.remove(&RecordRef::id("two")).unwrap();

        assert_eq!(removed.id, "two");
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].id, "one");
    }

    #[test]
    fn test_structural_reference_resolves_first_match() {
        let store = RecordStore::from_records(vec![
            record("one", "2024-01-01", "09:00", "same", 3),
            record("two", "2024-01-01", "09:00", "same", 3),
        ]);
        let target = RecordRef::Fields {
            date: parse_date("2024-01-01").unwrap(),
            time: "09:00".to_string(),
            content: "same".to_string(),
        };
        assert_eq!(store.position(&target), Some(0));
    }

    #[test]
    fn test_missing_reference_is_none() {
        let mut store = RecordStore::from_records(vec![record("a", "2024-01-01", "", "x", 1)]);
        let missing = RecordRef::id("nope");

        assert!(store.get(&missing).is_none());
        assert!(store.toggle_completed(&missing).is_none());
        assert!(store.update(&missing, &RecordPatch::new().mood(2)).is_none());
        assert!(store.remove(&missing).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_toggle_and_update_in_place() {
        let mut store = RecordStore::from_records(vec![
            record("a", "2024-01-01", "", "x", 1),
            record("b", "2024-01-02", "", "y", 2),
        ]);

        assert_eq!(store.toggle_completed(&RecordRef::id("b")), Some(true));
        assert_eq!(store.toggle_completed(&RecordRef::id("b")), Some(false));

        let updated = store
            .update(&RecordRef::id("a"), &RecordPatch::new().content("z"))
            .unwrap();
        assert_eq!(updated.content, "z");
        assert_eq!(store.records()[0].id, "a");
    }

    #[test]
    fn test_repair_ids_fills_missing_and_duplicates() {
        let mut store = RecordStore::from_records(vec![
            record("", "2024-01-01", "", "x", 1),
            record("dup", "2024-01-02", "", "y", 2),
            record("dup", "2024-01-03", "", "z", 3),
        ]);

        assert_eq!(store.repair_ids(), 2);
        let ids: HashSet<&str> = store.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert!(!ids.contains(""));
        assert_eq!(store.records()[1].id, "dup");
        assert_eq!(store.repair_ids(), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let store = RecordStore::from_records(vec![
            record("a", "2024-01-01", "08:00", "x", 1),
            record("b", "2024-01-02", "", "y \"quoted\"", 5),
        ]);
        let parsed = RecordStore::from_json(&store.to_json().unwrap()).unwrap();
        assert_eq!(parsed, store);
    }
}
