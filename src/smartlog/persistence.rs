//! # Persistence Adapter
//!
//! Mirrors the canonical collection and the id counter into a [`KeyValueStore`]
//! under two keys, [`LOGS_KEY`] (JSON array of records) and [`NEXT_ID_KEY`]
//! (string-encoded integer).
//!
//! Loading never fails: a missing collection is replaced by a caller-supplied
//! seed (which is written back right away), and unreadable data degrades to an
//! empty collection with the counter at 1. Saving is best effort: errors are
//! returned to the caller, who keeps its in-memory state either way.

use crate::error::Result;
use crate::model::{next_id_after, LogRecord};
use crate::store::KeyValueStore;
use tracing::{debug, info, warn};

pub const LOGS_KEY: &str = "logs";
pub const NEXT_ID_KEY: &str = "nextLogId";

/// Where the state returned by [`Persistence::load`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Stored,
    Seeded,
    Recovered,
}

#[derive(Debug, Clone)]
pub struct LoadedState {
    pub records: Vec<LogRecord>,
    pub next_id: u64,
    pub source: LoadSource,
}

pub struct Persistence<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn load<F>(&mut self, seed: F) -> LoadedState
    where
        F: FnOnce() -> (Vec<LogRecord>, u64),
    {
        let raw = match self.store.get(LOGS_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "could not read stored logs, starting empty");
                return recovered();
            }
        };

        let Some(raw) = raw else {
            let (records, next_id) = seed();
            if let Err(e) = self.save(&records, next_id) {
                warn!(error = %e, "could not persist seed data");
            }
            info!(count = records.len(), "seeded new log book");
            return LoadedState {
                records,
                next_id,
                source: LoadSource::Seeded,
            };
        };

        let records: Vec<LogRecord> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "stored logs are corrupt, starting empty");
                return recovered();
            }
        };

        let Some(floor) = next_id_after(&records) else {
            warn!("stored logs use the highest possible id, starting empty");
            return recovered();
        };

        let next_id = self.stored_next_id(records.len(), floor);
        info!(count = records.len(), next_id, "loaded logs");
        LoadedState {
            records,
            next_id,
            source: LoadSource::Stored,
        }
    }

    /// Write the collection, then the counter. A failure on either write is returned
    /// as-is; nothing already written is undone.
    pub fn save(&mut self, records: &[LogRecord], next_id: u64) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.store.set(LOGS_KEY, &json)?;
        self.store.set(NEXT_ID_KEY, &next_id.to_string())?;
        debug!(count = records.len(), next_id, "saved logs");
        Ok(())
    }

    /// `floor` is one past the highest stored id.
    fn stored_next_id(&self, len: usize, floor: u64) -> u64 {
        let fallback = len as u64 + 1;
        let stored = match self.store.get(NEXT_ID_KEY) {
            Ok(Some(raw)) => raw.trim().parse::<u64>().ok().filter(|n| *n > 0),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "could not read stored counter");
                None
            }
        };
        let next_id = stored.unwrap_or(fallback);

        // A stale counter must never hand out an id that is already in use.
        if next_id < floor {
            warn!(next_id, floor, "stored counter behind highest id, advancing");
            return floor;
        }
        next_id
    }
}

fn recovered() -> LoadedState {
    LoadedState {
        records: Vec::new(),
        next_id: 1,
        source: LoadSource::Recovered,
    }
}
