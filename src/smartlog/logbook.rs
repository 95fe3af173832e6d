//! # Record Store
//!
//! [`Logbook`] is the single owner of the canonical collection (insertion-ordered)
//! and the id counter. Every mutation is mirrored through the persistence adapter
//! before returning.
//!
//! Id rules:
//! - `create` and imports hand out ids from the counter, which only moves forward
//!   (deleted ids are never reused).
//! - `replace_all` trusts the ids it is given and recomputes the counter as
//!   `max + 1` (or 1 when empty). Duplicates coming in that way are kept as-is.
//!
//! When a save fails the in-memory mutation has already happened and stays; the
//! error is returned so the caller can report lost durability.

use crate::error::{Result, SmartlogError};
use crate::model::{
    local_timestamp, next_id_after, seed_records, LogRecord, DEFAULT_TIMESTAMP_FORMAT,
};
use crate::persistence::{LoadSource, Persistence};
use crate::store::KeyValueStore;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LogbookOptions {
    /// strftime pattern used to stamp new records
    pub timestamp_format: String,
    /// Write the two sample records when nothing is stored yet
    pub seed_on_first_run: bool,
}

impl Default for LogbookOptions {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            seed_on_first_run: true,
        }
    }
}

pub struct Logbook<S: KeyValueStore> {
    records: Vec<LogRecord>,
    next_id: u64,
    persistence: Persistence<S>,
    timestamp_format: String,
    load_source: LoadSource,
}

impl<S: KeyValueStore> Logbook<S> {
    pub fn open(store: S) -> Self {
        Self::open_with(store, &LogbookOptions::default())
    }

    pub fn open_with(store: S, options: &LogbookOptions) -> Self {
        let mut persistence = Persistence::new(store);
        let format = options.timestamp_format.clone();
        let state = persistence.load(|| {
            if options.seed_on_first_run {
                seed_records(&local_timestamp(&format))
            } else {
                (Vec::new(), 1)
            }
        });

        Self {
            records: state.records,
            next_id: state.next_id,
            persistence,
            timestamp_format: options.timestamp_format.clone(),
            load_source: state.source,
        }
    }

    /// Create a record from user input. Both fields are trimmed; if both end up
    /// empty nothing is created and no id is consumed.
    pub fn create(&mut self, title: &str, content: &str) -> Result<LogRecord> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() && content.is_empty() {
            return Err(SmartlogError::EmptyRecord);
        }

        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(SmartlogError::IdsExhausted)?;
        let record = LogRecord::new(id, title, content, local_timestamp(&self.timestamp_format));
        self.records.push(record.clone());
        debug!(id, "created log");

        self.persist()?;
        Ok(record)
    }

    /// Remove the record with `id`. Absent ids are a no-op, but the collection is
    /// still persisted. The counter is left alone.
    pub fn delete(&mut self, id: u64) -> Result<Option<LogRecord>> {
        let removed = self
            .records
            .iter()
            .position(|r| r.id == id)
            .map(|pos| self.records.remove(pos));
        debug!(id, found = removed.is_some(), "deleted log");

        self.persist()?;
        Ok(removed)
    }

    /// Empty the collection and reset the counter to 1. Returns how many records
    /// were dropped.
    pub fn clear_all(&mut self) -> Result<usize> {
        let count = self.records.len();
        self.records.clear();
        self.next_id = 1;
        debug!(count, "cleared all logs");

        self.persist()?;
        Ok(count)
    }

    /// Replace the whole collection, trusting the given ids verbatim.
    /// Fails without touching anything if an id is `u64::MAX`, since no counter
    /// could follow it.
    pub fn replace_all(&mut self, records: Vec<LogRecord>) -> Result<()> {
        self.next_id = next_id_after(&records).ok_or_else(ids_exhausted)?;
        self.records = records;
        debug!(count = self.records.len(), next_id = self.next_id, "replaced all logs");

        self.persist()
    }

    /// Append an imported batch after the existing records and move the counter past
    /// the highest id of the merged collection.
    pub fn append_imported(&mut self, batch: Vec<LogRecord>) -> Result<usize> {
        let count = batch.len();
        self.next_id = next_id_after(self.records.iter().chain(&batch))
            .ok_or_else(ids_exhausted)?;
        self.records.extend(batch);
        debug!(count, next_id = self.next_id, "appended imported logs");

        self.persist()?;
        Ok(count)
    }

    pub fn find(&self, id: u64) -> Result<&LogRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or(SmartlogError::RecordNotFound(id))
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    pub fn store_mut(&mut self) -> &mut S {
        self.persistence.store_mut()
    }

    fn persist(&mut self) -> Result<()> {
        self.persistence.save(&self.records, self.next_id)
    }
}

fn ids_exhausted() -> SmartlogError {
    SmartlogError::InvalidImport("Log ids must be below 18446744073709551615".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn empty_book() -> Logbook<InMemoryStore> {
        let options = LogbookOptions {
            seed_on_first_run: false,
            ..LogbookOptions::default()
        };
        Logbook::open_with(InMemoryStore::new(), &options)
    }

    fn ids(book: &Logbook<InMemoryStore>) -> Vec<u64> {
        book.all().iter().map(|r| r.id).collect()
    }

    #[test]
    fn opens_with_seed_by_default() {
        let book = Logbook::open(InMemoryStore::new());
        assert_eq!(book.load_source(), LoadSource::Seeded);
        assert_eq!(ids(&book), vec![1, 2]);
        assert_eq!(book.next_id(), 3);
    }

    #[test]
    fn create_assigns_increasing_ids() {
        let mut book = empty_book();
        let mut last = 0;
        for i in 0..5 {
            let record = book.create(&format!("t{}", i), "").unwrap();
            assert!(record.id > last);
            last = record.id;
        }
        assert_eq!(book.next_id(), 6);
    }

    #[test]
    fn create_trims_and_stamps() {
        let mut book = empty_book();
        let record = book.create("  Title  ", "\n body \n").unwrap();
        assert_eq!(record.title, "Title");
        assert_eq!(record.content, "body");
        assert!(!record.timestamp.is_empty());
    }

    #[test]
    fn create_rejects_blank_input() {
        let mut book = empty_book();
        assert!(matches!(book.create("", ""), Err(SmartlogError::EmptyRecord)));
        assert!(matches!(
            book.create("   ", ""),
            Err(SmartlogError::EmptyRecord)
        ));
        assert!(book.is_empty());
        assert_eq!(book.next_id(), 1);
    }

    #[test]
    fn create_accepts_title_or_content_alone() {
        let mut book = empty_book();
        book.create("only title", "").unwrap();
        book.create("", "only content").unwrap();
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let mut book = empty_book();
        for t in ["a", "b", "c"] {
            book.create(t, "").unwrap();
        }
        let removed = book.delete(2).unwrap();
        assert_eq!(removed.map(|r| r.title), Some("b".to_string()));

        let record = book.create("d", "").unwrap();
        assert_eq!(record.id, 4);
        assert_eq!(ids(&book), vec![1, 3, 4]);
    }

    #[test]
    fn delete_missing_is_noop() {
        let mut book = empty_book();
        book.create("a", "").unwrap();
        assert_eq!(book.delete(99).unwrap(), None);
        assert_eq!(book.len(), 1);
        assert_eq!(book.next_id(), 2);
    }

    #[test]
    fn clear_all_resets_counter() {
        let mut book = empty_book();
        book.create("a", "").unwrap();
        book.create("b", "").unwrap();

        assert_eq!(book.clear_all().unwrap(), 2);
        assert!(book.is_empty());
        assert_eq!(book.next_id(), 1);
        assert_eq!(book.create("c", "").unwrap().id, 1);
    }

    #[test]
    fn replace_all_recomputes_counter() {
        let mut book = empty_book();
        book.replace_all(vec![
            LogRecord::new(5, "five", "", "t"),
            LogRecord::new(9, "nine", "", "t"),
        ])
        .unwrap();
        assert_eq!(book.next_id(), 10);

        book.replace_all(Vec::new()).unwrap();
        assert_eq!(book.next_id(), 1);
    }

    #[test]
    fn replace_all_keeps_duplicate_ids() {
        let mut book = empty_book();
        book.replace_all(vec![
            LogRecord::new(3, "x", "", "t"),
            LogRecord::new(3, "y", "", "t"),
        ])
        .unwrap();
        assert_eq!(ids(&book), vec![3, 3]);
        assert_eq!(book.next_id(), 4);
    }

    #[test]
    fn replace_all_rejects_highest_possible_id() {
        let mut book = empty_book();
        book.create("kept", "").unwrap();

        let err = book
            .replace_all(vec![LogRecord::new(u64::MAX, "max", "", "t")])
            .unwrap_err();
        assert!(matches!(err, SmartlogError::InvalidImport(_)));
        assert_eq!(ids(&book), vec![1]);
        assert_eq!(book.next_id(), 2);
    }

    #[test]
    fn create_fails_when_counter_is_exhausted() {
        let mut book = empty_book();
        book.replace_all(vec![LogRecord::new(u64::MAX - 1, "last", "", "t")])
            .unwrap();
        assert_eq!(book.next_id(), u64::MAX);

        assert!(matches!(book.create("x", ""), Err(SmartlogError::IdsExhausted)));
        assert_eq!(book.len(), 1);
        assert_eq!(book.next_id(), u64::MAX);
    }

    #[test]
    fn append_imported_keeps_existing_records() {
        let mut book = empty_book();
        book.create("existing", "").unwrap();
        let start = book.next_id();
        let batch = vec![
            LogRecord::new(start, "i1", "", "t"),
            LogRecord::new(start + 1, "i2", "", "t"),
        ];
        assert_eq!(book.append_imported(batch).unwrap(), 2);
        assert_eq!(ids(&book), vec![1, 2, 3]);
        assert_eq!(book.next_id(), 4);
    }

    #[test]
    fn find_reports_missing_ids() {
        let mut book = empty_book();
        book.create("a", "").unwrap();
        assert_eq!(book.find(1).unwrap().title, "a");
        assert!(matches!(book.find(2), Err(SmartlogError::RecordNotFound(2))));
    }

    #[test]
    fn all_preserves_insertion_order() {
        let fixture = StoreFixture::new().with_records(&[
            LogRecord::new(3, "c", "", "t"),
            LogRecord::new(1, "a", "", "t"),
            LogRecord::new(2, "b", "", "t"),
        ]);
        let book = Logbook::open(fixture.store);
        assert_eq!(ids(&book), vec![3, 1, 2]);
    }

    #[test]
    fn mutations_survive_reopen() {
        let mut book = empty_book();
        book.create("kept", "body").unwrap();
        book.create("gone", "").unwrap();
        book.delete(2).unwrap();

        let store = std::mem::take(book.store_mut());
        let reopened = Logbook::open(store);
        assert_eq!(reopened.load_source(), LoadSource::Stored);
        assert_eq!(reopened.all().len(), 1);
        assert_eq!(reopened.all()[0].title, "kept");
        assert_eq!(reopened.next_id(), 3);
    }

    #[test]
    fn failed_save_keeps_memory_state() {
        let mut book = empty_book();
        book.store_mut().fail_writes(true);

        assert!(book.create("unsaved", "").is_err());
        assert_eq!(book.len(), 1);
        assert_eq!(book.next_id(), 2);
    }
}
