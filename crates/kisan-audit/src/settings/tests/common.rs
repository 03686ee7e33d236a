use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::settings::store::{KeyValueStore, MemoryStore, StoreError};
use crate::settings::sync::{SettingsSync, SETTINGS_STORAGE_KEY};

static SCRATCH_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Unique, not yet created file path under the system temp directory.
pub(super) fn scratch_path(label: &str) -> PathBuf {
    let id = SCRATCH_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir()
        .join(format!("kisan-audit-{}-{label}-{id}", std::process::id()))
        .join("settings.json")
}

pub(super) fn memory_sync() -> (Arc<SettingsSync<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let sync = Arc::new(SettingsSync::open(store.clone()));
    (sync, store)
}

pub(super) fn seeded_store(raw: &str) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store
        .set(SETTINGS_STORAGE_KEY, raw.to_string())
        .expect("memory store accepts writes");
    store
}

/// Store whose reads succeed but whose writes always fail.
#[derive(Default)]
pub(super) struct ReadOnlyStore {
    pub(super) inner: MemoryStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage quota exceeded".to_string()))
    }
}

/// Store that cannot be read at all.
pub(super) struct OfflineStore;

impl KeyValueStore for OfflineStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }

    fn set(&self, _key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
