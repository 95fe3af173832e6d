use super::KeyValueStore;
use crate::error::{Result, SmartlogError};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    values: HashMap<String, String>,
    fail_writes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail, as a full quota would.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(SmartlogError::Store(format!(
                "Quota exceeded while writing {}",
                key
            )));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{next_id_after, LogRecord};
    use crate::persistence::{LOGS_KEY, NEXT_ID_KEY};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Persist `records` with a counter one past the highest id.
        pub fn with_records(mut self, records: &[LogRecord]) -> Self {
            let next_id = next_id_after(records).unwrap_or(u64::MAX);
            let json = serde_json::to_string(records).unwrap();
            self.store.set(LOGS_KEY, &json).unwrap();
            self.store.set(NEXT_ID_KEY, &next_id.to_string()).unwrap();
            self
        }

        pub fn with_raw(mut self, key: &str, value: &str) -> Self {
            self.store.set(key, value).unwrap();
            self
        }
    }
}
