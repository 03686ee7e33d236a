use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

/// Name of the payload-free notification raised after every settings write.
pub const SETTINGS_UPDATED_EVENT: &str = "settings-updated";

pub type SettingsListener = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`SettingsBus::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Publish/subscribe registry for settings change notifications.
///
/// Listeners receive no payload and are expected to re-read the settings they care about.
/// Delivery order among listeners is not part of the contract.
#[derive(Clone, Default)]
pub struct SettingsBus {
    registry: Arc<Mutex<Registry>>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<SubscriptionId, SettingsListener>,
}

impl SettingsBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        registry.next_id += 1;
        let id = SubscriptionId(registry.next_id);
        registry.listeners.insert(id, Arc::new(listener));
        id
    }

    /// Returns `false` when the subscription was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        registry.listeners.remove(&id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        let registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        registry.listeners.len()
    }

    /// Invoke every registered listener once, returning how many were notified.
    ///
    /// The registry lock is released before listeners run so they may subscribe or unsubscribe.
    pub fn broadcast(&self) -> usize {
        let listeners: Vec<SettingsListener> = {
            let registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry.listeners.values().cloned().collect()
        };

        debug!(
            event = SETTINGS_UPDATED_EVENT,
            listeners = listeners.len(),
            "broadcasting settings change"
        );

        for listener in &listeners {
            listener();
        }
        listeners.len()
    }
}

impl fmt::Debug for SettingsBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
