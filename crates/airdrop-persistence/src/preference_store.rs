use airdrop_core::config::Defaults;
use airdrop_core::{BoardError, BoardResult, KeyValueStore};
use airdrop_domain::{Language, NotificationPermission, Theme};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use crate::keys::{LANGUAGE_KEY, NOTIFICATION_PERMISSION_KEY, THEME_KEY};

/// Theme, language and notification permission, each under its own key.
///
/// Values are written as JSON strings. Bare strings written by hand are read too,
/// and anything unrecognized falls back to the configured default.
pub struct PreferenceStore {
    kv: Arc<dyn KeyValueStore>,
    default_theme: Theme,
    default_language: Language,
}

impl PreferenceStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, defaults: &Defaults) -> Self {
        Self {
            kv,
            default_theme: defaults.theme.parse().unwrap_or_default(),
            default_language: defaults.language.parse().unwrap_or_default(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.read(THEME_KEY).unwrap_or(self.default_theme)
    }

    pub fn set_theme(&self, theme: Theme) -> BoardResult<()> {
        self.write(THEME_KEY, theme)
    }

    pub fn language(&self) -> Language {
        self.read(LANGUAGE_KEY).unwrap_or(self.default_language)
    }

    pub fn set_language(&self, language: Language) -> BoardResult<()> {
        self.write(LANGUAGE_KEY, language)
    }

    pub fn notification_permission(&self) -> NotificationPermission {
        self.read(NOTIFICATION_PERMISSION_KEY).unwrap_or_default()
    }

    pub fn set_notification_permission(&self, permission: NotificationPermission) -> BoardResult<()> {
        self.write(NOTIFICATION_PERMISSION_KEY, permission)
    }

    fn read<T: FromStr>(&self, key: &str) -> Option<T> {
        let raw = match self.kv.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Failed to read preference '{}': {}", key, e);
                return None;
            }
        };
        let text = serde_json::from_str::<String>(&raw).unwrap_or_else(|_| raw.trim().to_string());
        let parsed = text.parse().ok();
        if parsed.is_none() {
            tracing::debug!("Ignoring unrecognized value for '{}': {}", key, text);
        }
        parsed
    }

    fn write<T: Display>(&self, key: &str, value: T) -> BoardResult<()> {
        let json = serde_json::to_string(&value.to_string())
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        self.kv.set(key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn store() -> (Arc<MemoryStore>, PreferenceStore) {
        let kv = Arc::new(MemoryStore::new());
        let prefs = PreferenceStore::new(kv.clone(), &Defaults::default());
        (kv, prefs)
    }

    #[test]
    fn test_defaults_when_nothing_stored() {
        let (_, prefs) = store();
        assert_eq!(prefs.theme(), Theme::Dark);
        assert_eq!(prefs.language(), Language::Pt);
        assert!(prefs.notification_permission().is_undetermined());
    }

    #[test]
    fn test_values_persist_as_json_strings() {
        let (kv, prefs) = store();
        prefs.set_theme(Theme::Light).unwrap();
        prefs.set_language(Language::Zh).unwrap();
        prefs
            .set_notification_permission(NotificationPermission::Granted)
            .unwrap();

        assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some("\"light\""));
        assert_eq!(prefs.theme(), Theme::Light);
        assert_eq!(prefs.language(), Language::Zh);
        assert_eq!(prefs.notification_permission(), NotificationPermission::Granted);
    }

    #[test]
    fn test_bare_and_garbage_values() {
        let (kv, prefs) = store();
        kv.set(LANGUAGE_KEY, "en").unwrap();
        kv.set(THEME_KEY, "\"purple\"").unwrap();

        assert_eq!(prefs.language(), Language::En);
        assert_eq!(prefs.theme(), Theme::Dark);
    }

    #[test]
    fn test_configured_defaults_apply() {
        let defaults = Defaults {
            theme: "light".into(),
            language: "es".into(),
            ..Defaults::default()
        };
        let prefs = PreferenceStore::new(Arc::new(MemoryStore::new()), &defaults);
        assert_eq!(prefs.theme(), Theme::Light);
        assert_eq!(prefs.language(), Language::Es);
    }
}
