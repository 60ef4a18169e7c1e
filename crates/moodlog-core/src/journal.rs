//! The journal: record store, undo history and storage backend in one owner.
//!
//! Every mutator follows the same sequence: snapshot the store, mutate it,
//! persist the whole document, then push the snapshot onto the undo history.
//! A failed persist rolls the store back to the snapshot and leaves the
//! history untouched, so memory never drifts from what is on disk.
//!
//! Lookups that miss are silent no-ops: nothing is snapshotted or persisted
//! and the mutator returns `None`.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{MoodlogError, Result};
use crate::history::UndoBuffer;
use crate::query::{self, Criteria};
use crate::record::{generate_id, NewRecord, Record, RecordPatch, RecordRef};
use crate::stats::{self, Statistics};
use crate::storage::RecordStorage;
use crate::store::RecordStore;
use crate::transfer::{self, ImportBatch, ImportReport};

/// Owner of the live record store.
#[derive(Debug)]
pub struct Journal<S: RecordStorage> {
    store: RecordStore,
    history: UndoBuffer,
    storage: S,
}

impl<S: RecordStorage> Journal<S> {
    /// Load the journal from its backend.
    ///
    /// A missing document opens an empty journal. A document that is not a
    /// JSON array also opens empty (logged, and left on disk until the next
    /// mutation). Records that fail validation are dropped, and missing or
    /// duplicate ids are assigned; either repair re-persists immediately.
    ///
    /// # Errors
    ///
    /// Returns `MoodlogError::Storage` if the backend cannot be read, or if a
    /// repaired document cannot be written back.
    pub fn open(mut storage: S) -> Result<Self> {
        let (mut store, mut dirty) = match storage.read()? {
            Some(document) => load_document(&document, &storage.location()),
            None => (RecordStore::new(), false),
        };

        let repaired = store.repair_ids();
        if repaired > 0 {
            debug!(repaired, "assigned missing or duplicate record ids");
            dirty = true;
        }
        if dirty {
            storage.write(&store.to_json()?)?;
            debug!(location = %storage.location(), "re-persisted repaired journal");
        }

        debug!(records = store.len(), location = %storage.location(), "journal opened");
        Ok(Self {
            store,
            history: UndoBuffer::new(),
            storage,
        })
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Number of snapshots available to undo.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Filtered, sorted view of the store.
    pub fn view(&self, criteria: &Criteria) -> Vec<&Record> {
        query::view(&self.store, criteria)
    }

    /// Statistics over the whole store.
    pub fn statistics(&self) -> Statistics {
        stats::statistics(&self.store)
    }

    pub fn get(&self, target: &RecordRef) -> Option<&Record> {
        self.store.get(target)
    }

    /// Append a new record.
    ///
    /// # Errors
    ///
    /// Returns `MoodlogError::Validation` for blank content, an out-of-range
    /// mood or a malformed time. Nothing changes in that case.
    pub fn add(&mut self, new_record: NewRecord) -> Result<&Record> {
        new_record.validate()?;
        let mut id = generate_id();
        while self.store.contains_id(&id) {
            id = generate_id();
        }
        let record = new_record.into_record(id);
        debug!(id = %record.id, mood = record.mood, "adding record");

        self.commit(|store| {
            store.append(record);
            Some(())
        })?;
        self.store
            .records()
            .last()
            .ok_or_else(|| MoodlogError::Storage("record vanished after add".to_string()))
    }

    /// Apply a patch to the referenced record.
    ///
    /// Returns `Ok(None)` if the record does not exist.
    pub fn edit(&mut self, target: &RecordRef, patch: RecordPatch) -> Result<Option<&Record>> {
        patch.validate()?;
        debug!(target = %describe(target), "editing record");

        let index = self.commit(|store| {
            let index = store.position(target)?;
            store.update(target, &patch)?;
            Some(index)
        })?;
        Ok(index.and_then(|index| self.store.records().get(index)))
    }

    /// Flip the completion flag. Returns the new value.
    pub fn toggle_completed(&mut self, target: &RecordRef) -> Result<Option<bool>> {
        debug!(target = %describe(target), "toggling completion");
        self.commit(|store| store.toggle_completed(target))
    }

    /// Remove the referenced record. Returns it.
    pub fn delete(&mut self, target: &RecordRef) -> Result<Option<Record>> {
        debug!(target = %describe(target), "deleting record");
        self.commit(|store| store.remove(target))
    }

    /// Parse an import document and append every valid element.
    ///
    /// # Errors
    ///
    /// Returns `MoodlogError::Transfer` when the document is not JSON or not
    /// an array; the store is unchanged.
    pub fn import_document(&mut self, document: &str) -> Result<ImportReport> {
        let batch = transfer::parse_import(document)?;
        self.import_batch(batch)
    }

    /// Append already-validated records.
    ///
    /// Imported ids that collide with an existing id (or an earlier one in
    /// the batch) are replaced with fresh ids. An empty batch changes nothing.
    pub fn import_batch(&mut self, batch: ImportBatch) -> Result<ImportReport> {
        let ImportBatch {
            mut records,
            skipped,
        } = batch;

        let mut seen: HashSet<String> = self.store.iter().map(|r| r.id.clone()).collect();
        for record in &mut records {
            while !seen.insert(record.id.clone()) {
                record.id = generate_id();
            }
        }

        let report = ImportReport {
            imported: records.len(),
            skipped,
        };
        debug!(imported = report.imported, skipped, "importing records");

        if !records.is_empty() {
            self.commit(|store| {
                store.extend(records);
                Some(())
            })?;
        }
        Ok(report)
    }

    /// Restore the most recent snapshot.
    ///
    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        let Some(snapshot) = self.history.pop() else {
            return Ok(false);
        };
        let current = self.store.replace(snapshot);
        if let Err(err) = self.persist() {
            let snapshot = self.store.replace(current);
            self.history.push(snapshot);
            return Err(err);
        }
        debug!(remaining = self.history.len(), "undo applied");
        Ok(true)
    }

    /// Serialize the whole store for export.
    pub fn export_document(&self) -> Result<String> {
        Ok(transfer::export_document(self.store.records())?)
    }

    /// Snapshot, mutate, persist. `None` from `mutate` means nothing changed.
    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut RecordStore) -> Option<T>,
    ) -> Result<Option<T>> {
        let snapshot = self.store.snapshot();
        let Some(outcome) = mutate(&mut self.store) else {
            debug!("reference not found; nothing changed");
            return Ok(None);
        };
        if let Err(err) = self.persist() {
            self.store.replace(snapshot);
            return Err(err);
        }
        self.history.push(snapshot);
        Ok(Some(outcome))
    }

    fn persist(&mut self) -> Result<()> {
        let document = self.store.to_json()?;
        self.storage.write(&document)?;
        debug!(records = self.store.len(), bytes = document.len(), "journal persisted");
        Ok(())
    }
}

/// Parse a persisted document, falling back element by element.
///
/// Returns the store and whether it differs from the document.
fn load_document(document: &str, location: &str) -> (RecordStore, bool) {
    if document.trim().is_empty() {
        return (RecordStore::new(), false);
    }
    if let Ok(store) = RecordStore::from_json(document) {
        if store.iter().all(|record| record.validate().is_ok()) {
            return (store, false);
        }
    }

    match transfer::parse_import(document) {
        Ok(batch) => {
            if batch.skipped > 0 {
                warn!(
                    location,
                    skipped = batch.skipped,
                    "dropped invalid records from journal"
                );
            }
            (RecordStore::from_records(batch.records), true)
        }
        Err(err) => {
            warn!(location, error = %err, "journal is unreadable; starting empty");
            (RecordStore::new(), false)
        }
    }
}

fn describe(target: &RecordRef) -> String {
    match target {
        RecordRef::Id(id) => format!("record {}", id),
        RecordRef::Fields {
            date,
            time,
            content,
        } => format!("record {} {} {:?}", date, time, content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::UNDO_LIMIT;
    use crate::record::parse_date;
    use crate::storage::MemoryStorage;

    fn new_record(date: &str, content: &str, mood: u8) -> NewRecord {
        NewRecord::new(parse_date(date).unwrap(), content, mood).with_time("12:00")
    }

    fn journal() -> Journal<MemoryStorage> {
        Journal::open(MemoryStorage::new()).unwrap()
    }

    #[test]
    fn test_open_empty_backend() {
        let journal = journal();
        assert!(journal.store().is_empty());
        assert!(!journal.can_undo());
        assert_eq!(journal.storage().writes(), 0);
    }

    #[test]
    fn test_add_persists_and_undo_restores_exact_state() {
        let mut journal = journal();
        journal.add(new_record("2024-01-01", "ok", 3)).unwrap();
        let before = journal.store().to_json().unwrap();

        let added = journal.add(new_record("2024-01-02", "great", 5)).unwrap();
        assert_eq!(added.content, "great");
        assert_eq!(journal.storage().writes(), 2);

        assert!(journal.undo().unwrap());
        assert_eq!(journal.store().to_json().unwrap(), before);
        assert_eq!(journal.storage().document(), Some(before.as_str()));
    }

    #[test]
    fn test_statistics_after_add_scenario() {
        let mut journal = journal();
        journal.add(new_record("2024-01-01", "ok", 3)).unwrap();
        journal.add(new_record("2024-01-02", "great", 5)).unwrap();

        let stats = journal.statistics();
        assert_eq!(stats.count, 2);
        assert_eq!(stats::format_metric(stats.mean), "4.00");
        assert_eq!(stats.mode, Some(3));
        assert_eq!(stats::format_metric(stats.std_dev), "1.00");
    }

    #[test]
    fn test_invalid_add_changes_nothing() {
        let mut journal = journal();
        let err = journal.add(new_record("2024-01-01", "  ", 3)).unwrap_err();

        assert!(matches!(err, MoodlogError::Validation(_)));
        assert!(journal.store().is_empty());
        assert!(!journal.can_undo());
        assert_eq!(journal.storage().writes(), 0);
    }

    #[test]
    fn test_missing_reference_is_silent_noop() {
        let mut journal = journal();
        journal.add(new_record("2024-01-01", "ok", 3)).unwrap();
        let missing = RecordRef::id("missing");

        assert!(journal.toggle_completed(&missing).unwrap().is_none());
        assert!(journal.delete(&missing).unwrap().is_none());
        assert!(journal
            .edit(&missing, RecordPatch::new().mood(1))
            .unwrap()
            .is_none());
        assert_eq!(journal.undo_depth(), 1);
        assert_eq!(journal.storage().writes(), 1);
        assert!(journal.get(&missing).is_none());
    }

    #[test]
    fn test_edit_toggle_delete_each_snapshot() {
        let mut journal = journal();
        let id = journal.add(new_record("2024-01-01", "ok", 3)).unwrap().id.clone();
        let target = RecordRef::id(id.as_str());

        let edited = journal
            .edit(&target, RecordPatch::new().content("better").mood(4))
            .unwrap()
            .unwrap();
        assert_eq!(edited.content, "better");
        assert_eq!(journal.toggle_completed(&target).unwrap(), Some(true));
        assert_eq!(journal.delete(&target).unwrap().unwrap().id, id);
        assert_eq!(journal.undo_depth(), 4);

        journal.undo().unwrap();
        assert!(journal.get(&target).unwrap().completed);
        journal.undo().unwrap();
        assert!(!journal.get(&target).unwrap().completed);
        journal.undo().unwrap();
        assert_eq!(journal.get(&target).unwrap().content, "ok");
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut journal = journal();
        assert!(!journal.undo().unwrap());
        assert_eq!(journal.storage().writes(), 0);
    }

    #[test]
    fn test_history_keeps_last_twenty() {
        let mut journal = journal();
        for i in 0..=UNDO_LIMIT {
            journal
                .add(new_record("2024-01-01", &format!("entry {}", i), 3))
                .unwrap();
        }
        assert_eq!(journal.undo_depth(), UNDO_LIMIT);

        while journal.undo().unwrap() {}
        assert_eq!(journal.store().len(), 1);
        assert_eq!(journal.records()[0].content, "entry 0");
    }

    #[test]
    fn test_failed_persist_rolls_back() {
        let mut journal = journal();
        journal.add(new_record("2024-01-01", "ok", 3)).unwrap();
        let before = journal.store().clone();

        let mut storage = journal.storage.clone();
        storage.set_fail_writes(true);
        journal.storage = storage;

        let err = journal.add(new_record("2024-01-02", "lost", 5)).unwrap_err();
        assert!(matches!(err, MoodlogError::Storage(_)));
        assert_eq!(journal.store(), &before);
        assert_eq!(journal.undo_depth(), 1);

        assert!(journal.undo().is_err());
        assert_eq!(journal.store(), &before);
        assert_eq!(journal.undo_depth(), 1);
    }

    #[test]
    fn test_import_appends_and_reports() {
        let mut journal = journal();
        journal.add(new_record("2024-01-01", "ok", 3)).unwrap();

        let report = journal
            .import_document(
                r#"[{"date":"2024-02-01","content":"a","mood":4},{"date":"2024-02-02","content":"b","mood":"x"}]"#,
            )
            .unwrap();

        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(journal.store().len(), 2);
        assert_eq!(journal.undo_depth(), 2);
    }

    #[test]
    fn test_import_with_no_valid_records_leaves_store() {
        let mut journal = journal();
        let report = journal
            .import_document(r#"[{"date":"2024-02-01","content":"x","mood":"abc"}]"#)
            .unwrap();

        assert_eq!(report.imported, 0);
        assert_eq!(report.status_message(), "no valid records found");
        assert!(journal.store().is_empty());
        assert!(!journal.can_undo());
    }

    #[test]
    fn test_import_rejects_non_array() {
        let mut journal = journal();
        let err = journal.import_document("{}").unwrap_err();
        assert!(matches!(err, MoodlogError::Transfer(_)));
        assert!(!journal.can_undo());
    }

    #[test]
    fn test_import_reassigns_colliding_ids() {
        let mut journal = journal();
        let existing = journal.add(new_record("2024-01-01", "ok", 3)).unwrap().id.clone();
        let document = format!(
            r#"[{{"id":"{0}","date":"2024-02-01","content":"a","mood":4}},{{"id":"dup","date":"2024-02-01","content":"b","mood":4}},{{"id":"dup","date":"2024-02-01","content":"c","mood":4}}]"#,
            existing
        );

        journal.import_document(&document).unwrap();

        let ids: HashSet<&str> = journal.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(journal.records()[2].id, "dup");
    }

    #[test]
    fn test_open_repairs_missing_ids_and_repersists() {
        let storage = MemoryStorage::with_document(
            r#"[{"date":"2024-01-01","time":"","content":"legacy","mood":2,"completed":false}]"#,
        );
        let journal = Journal::open(storage).unwrap();

        assert_eq!(journal.storage().writes(), 1);
        assert!(!journal.records()[0].id.is_empty());
        let persisted = RecordStore::from_json(journal.storage().document().unwrap()).unwrap();
        assert_eq!(persisted.records()[0].id, journal.records()[0].id);
    }

    #[test]
    fn test_open_malformed_document_starts_empty() {
        let journal = Journal::open(MemoryStorage::with_document("{not json")).unwrap();
        assert!(journal.store().is_empty());
        assert_eq!(journal.storage().writes(), 0);
    }

    #[test]
    fn test_open_drops_invalid_records() {
        let storage = MemoryStorage::with_document(
            r#"[{"id":"a","date":"2024-01-01","content":"ok","mood":3},{"id":"b","date":"2024-01-01","content":"bad","mood":9}]"#,
        );
        let journal = Journal::open(storage).unwrap();

        assert_eq!(journal.store().len(), 1);
        assert_eq!(journal.records()[0].id, "a");
        assert_eq!(journal.storage().writes(), 1);
    }

    #[test]
    fn test_export_document_round_trips() {
        let mut journal = journal();
        journal.add(new_record("2024-01-01", "ok", 3)).unwrap();

        let exported = journal.export_document().unwrap();
        let parsed = RecordStore::from_json(&exported).unwrap();
        assert_eq!(&parsed, journal.store());
    }
}
