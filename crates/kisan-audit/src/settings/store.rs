use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

/// Synchronous string key-value storage backing the settings slot.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unable to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to encode store document: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store; values live as long as the store does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        guard.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store persisted as a single JSON object of string values on disk.
///
/// Each `set` rewrites the whole document through a sibling temporary file before renaming it
/// into place.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file that receives a write before it is renamed over the document.
    ///
    /// Appends to the full file name and carries the process id so concurrent writers never
    /// share a staging file.
    pub(crate) fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("store"));
        name.push(format!(".{}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_document(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let Some(raw) = self.read_document()? else {
            return Ok(BTreeMap::new());
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "discarding unreadable store document");
                Ok(BTreeMap::new())
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value);
        let document = serde_json::to_string_pretty(&entries)?;

        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let staging = self.staging_path();
        fs::write(&staging, document).map_err(|err| self.io_error(err))?;
        fs::rename(&staging, &self.path).map_err(|err| self.io_error(err))?;
        Ok(())
    }
}
