use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use casaflow_application::ClientStorage;

/// In-memory client storage for tests and ephemeral embeddings. Nothing
/// survives the process; sessions always start signed out.
#[derive(Debug, Default)]
pub struct InMemoryClientStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemoryClientStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ClientStorage for InMemoryClientStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}
