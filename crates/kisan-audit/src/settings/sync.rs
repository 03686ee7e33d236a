use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use super::domain::{AppSettings, SettingsPatch};
use super::notify::{SettingsBus, SubscriptionId};
use super::store::{KeyValueStore, StoreError};

/// Fixed key under which the settings record is persisted.
pub const SETTINGS_STORAGE_KEY: &str = "kisan.app_settings";

/// Lifecycle of the synchronized settings slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Uninitialized,
    Loaded,
}

/// Error raised when a settings write cannot be completed.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("unable to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

struct Slot {
    state: SyncState,
    settings: AppSettings,
}

/// Keeps the device settings in memory, persists every change and notifies listeners.
pub struct SettingsSync<S> {
    store: Arc<S>,
    bus: SettingsBus,
    slot: Mutex<Slot>,
}

impl<S> SettingsSync<S>
where
    S: KeyValueStore + 'static,
{
    /// Create an unstarted component holding the default record.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_bus(store, SettingsBus::new())
    }

    pub fn with_bus(store: Arc<S>, bus: SettingsBus) -> Self {
        Self {
            store,
            bus,
            slot: Mutex::new(Slot {
                state: SyncState::Uninitialized,
                settings: AppSettings::default(),
            }),
        }
    }

    /// Create the component and immediately hydrate it from storage.
    pub fn open(store: Arc<S>) -> Self {
        let sync = Self::new(store);
        sync.start();
        sync
    }

    /// Hydrate from storage on first call; later calls return the in-memory record.
    pub fn start(&self) -> AppSettings {
        let mut slot = self.lock_slot();
        self.ensure_loaded(&mut slot);
        slot.settings.clone()
    }

    pub fn state(&self) -> SyncState {
        self.lock_slot().state
    }

    pub fn bus(&self) -> &SettingsBus {
        &self.bus
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// The record currently held in memory.
    pub fn current(&self) -> AppSettings {
        self.lock_slot().settings.clone()
    }

    /// Read the persisted record, falling back to defaults when it is absent or unreadable.
    pub fn load(&self) -> AppSettings {
        let raw = match self.store.get(SETTINGS_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return AppSettings::default(),
            Err(err) => {
                warn!(error = %err, "settings store unreadable, using defaults");
                return AppSettings::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(error = %err, "failed to parse stored settings, using defaults");
                AppSettings::default()
            }
        }
    }

    /// Merge `patch` over the current record, persist it and notify listeners.
    ///
    /// On a storage failure the in-memory record is left unchanged and no notification is sent.
    pub fn update(&self, patch: SettingsPatch) -> Result<AppSettings, SettingsError> {
        let merged = {
            let mut slot = self.lock_slot();
            self.ensure_loaded(&mut slot);
            let merged = slot.settings.merge(&patch);
            self.persist(&merged)?;
            slot.settings = merged.clone();
            merged
        };

        info!(language = %merged.language, "settings updated");
        self.bus.broadcast();
        Ok(merged)
    }

    /// Persist and broadcast the default record.
    pub fn reset(&self) -> Result<AppSettings, SettingsError> {
        let defaults = AppSettings::default();
        {
            let mut slot = self.lock_slot();
            self.persist(&defaults)?;
            slot.state = SyncState::Loaded;
            slot.settings = defaults.clone();
        }

        info!("settings reset to defaults");
        self.bus.broadcast();
        Ok(defaults)
    }

    fn ensure_loaded(&self, slot: &mut Slot) {
        if slot.state == SyncState::Uninitialized {
            slot.settings = self.load();
            slot.state = SyncState::Loaded;
        }
    }

    fn persist(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        let encoded = serde_json::to_string(settings)?;
        self.store.set(SETTINGS_STORAGE_KEY, encoded)?;
        Ok(())
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
