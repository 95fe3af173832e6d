//! # Storage Layer
//!
//! The durable store is a flat string-to-string map, the same shape as a
//! browser's local storage. Only the persistence adapter
//! ([`crate::persistence::Persistence`]) talks to it.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one file per key under a data directory
//!   ```text
//!   <data dir>/
//!   ├── logs         # JSON array of log records
//!   ├── nextLogId    # string-encoded counter
//!   └── config.json  # user configuration (not managed by the store)
//!   ```
//! - [`memory::InMemoryStore`]: no persistence, used by tests
//!
//! Keeping storage behind a trait lets the record store and commands be tested
//! without touching the filesystem.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract interface for a local key-value store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
