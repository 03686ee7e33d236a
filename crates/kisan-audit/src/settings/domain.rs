use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE: &str = "hi";

/// Device preferences shared by every screen of the assistant.
///
/// Fields absent from a stored record fall back to their defaults when decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub language: String,
    pub voice_enabled: bool,
    pub notifications: bool,
    pub auto_translate: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            voice_enabled: true,
            notifications: true,
            auto_translate: true,
        }
    }
}

impl AppSettings {
    /// Shallow merge: every field present in the patch replaces the current value.
    pub fn merge(&self, patch: &SettingsPatch) -> AppSettings {
        AppSettings {
            language: patch
                .language
                .clone()
                .unwrap_or_else(|| self.language.clone()),
            voice_enabled: patch.voice_enabled.unwrap_or(self.voice_enabled),
            notifications: patch.notifications.unwrap_or(self.notifications),
            auto_translate: patch.auto_translate.unwrap_or(self.auto_translate),
        }
    }
}

/// Partial update applied over the current settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_translate: Option<bool>,
}

impl SettingsPatch {
    pub fn language(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.language.is_none()
            && self.voice_enabled.is_none()
            && self.notifications.is_none()
            && self.auto_translate.is_none()
    }

    /// Fold a later patch over this one; fields set in `later` win.
    pub fn then(self, later: SettingsPatch) -> SettingsPatch {
        SettingsPatch {
            language: later.language.or(self.language),
            voice_enabled: later.voice_enabled.or(self.voice_enabled),
            notifications: later.notifications.or(self.notifications),
            auto_translate: later.auto_translate.or(self.auto_translate),
        }
    }
}
