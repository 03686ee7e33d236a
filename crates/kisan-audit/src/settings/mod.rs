//! Device settings kept in a key-value slot and broadcast to independent observers.

pub mod domain;
pub mod notify;
pub mod router;
pub mod store;
pub mod sync;

#[cfg(test)]
mod tests;

pub use domain::{AppSettings, SettingsPatch, DEFAULT_LANGUAGE};
pub use notify::{SettingsBus, SettingsListener, SubscriptionId, SETTINGS_UPDATED_EVENT};
pub use router::settings_router;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use sync::{SettingsError, SettingsSync, SyncState, SETTINGS_STORAGE_KEY};
