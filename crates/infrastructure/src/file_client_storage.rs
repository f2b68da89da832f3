use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use casaflow_application::ClientStorage;
use casaflow_core::{ClientError, ClientResult};

/// JSON-file-backed client storage, the durable analogue of the web
/// client's local storage.
///
/// The whole map stays in memory for synchronous reads and is written
/// through on every mutation. Persistence failures are logged, not
/// surfaced: losing a preference write must never break a UI flow.
pub struct FileClientStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileClientStorage {
    /// Opens storage at `path`, reading existing entries when present.
    pub fn open(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|error| {
                ClientError::Decode(format!(
                    "corrupt client storage at '{}': {error}",
                    path.display()
                ))
            })?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => {
                return Err(ClientError::Validation(format!(
                    "cannot read client storage at '{}': {error}",
                    path.display()
                )));
            }
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, entries: &BTreeMap<String, String>) {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            let raw = serde_json::to_string_pretty(entries)?;
            fs::write(&self.path, raw)
        };

        if let Err(error) = write() {
            tracing::error!(
                path = %self.path.display(),
                error = %error,
                "failed to persist client storage"
            );
        }
    }
}

impl ClientStorage for FileClientStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.lock();
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}
