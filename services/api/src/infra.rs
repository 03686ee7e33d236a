use kisan_audit::config::StorageConfig;
use kisan_audit::settings::{FileStore, KeyValueStore, MemoryStore, StoreError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Settings file used by CLI commands when neither `--path` nor `APP_SETTINGS_PATH` is given.
pub(crate) const DEFAULT_SETTINGS_FILE: &str = "kisan-settings.json";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Storage backend chosen from configuration.
#[derive(Debug)]
pub(crate) enum DeviceStore {
    Memory(MemoryStore),
    File(FileStore),
}

impl DeviceStore {
    pub(crate) fn from_config(config: &StorageConfig) -> Self {
        match &config.settings_path {
            Some(path) => Self::file(path),
            None => Self::Memory(MemoryStore::new()),
        }
    }

    pub(crate) fn file(path: impl AsRef<Path>) -> Self {
        Self::File(FileStore::new(path.as_ref()))
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            DeviceStore::Memory(_) => "memory".to_string(),
            DeviceStore::File(store) => store.path().display().to_string(),
        }
    }
}

impl KeyValueStore for DeviceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            DeviceStore::Memory(store) => store.get(key),
            DeviceStore::File(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        match self {
            DeviceStore::Memory(store) => store.set(key, value),
            DeviceStore::File(store) => store.set(key, value),
        }
    }
}

/// Resolve the settings file for one-shot CLI commands.
pub(crate) fn cli_settings_path(explicit: Option<PathBuf>, config: &StorageConfig) -> PathBuf {
    explicit
        .or_else(|| config.settings_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_when_no_path_configured() {
        let store = DeviceStore::from_config(&StorageConfig::default());
        assert_eq!(store.describe(), "memory");
        store
            .set("probe", "value".to_string())
            .expect("memory store writable");
        assert_eq!(
            store.get("probe").expect("readable").as_deref(),
            Some("value")
        );
    }

    #[test]
    fn cli_path_prefers_explicit_then_config() {
        let config = StorageConfig {
            settings_path: Some(PathBuf::from("/srv/kisan/settings.json")),
        };

        assert_eq!(
            cli_settings_path(Some(PathBuf::from("local.json")), &config),
            PathBuf::from("local.json")
        );
        assert_eq!(
            cli_settings_path(None, &config),
            PathBuf::from("/srv/kisan/settings.json")
        );
        assert_eq!(
            cli_settings_path(None, &StorageConfig::default()),
            PathBuf::from(DEFAULT_SETTINGS_FILE)
        );
    }
}
