//! User preferences and the key/value store they are persisted in.
//!
//! Values are stored as JSON strings under fixed keys. A missing or corrupt
//! entry never fails a load; the caller gets the default instead.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

pub const SELECTED_CITY_KEY: &str = "selectedCity";
pub const HEALTH_PREFERENCES_KEY: &str = "healthPreferences";
pub const APP_SETTINGS_KEY: &str = "appSettings";

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("Failed to serialize preference: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, PreferenceError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub auto_refresh: bool,
    /// Minutes between dashboard refreshes.
    #[serde(rename = "refreshInterval")]
    pub refresh_interval_minutes: u32,
    pub notifications: bool,
    pub theme: Theme,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            auto_refresh: true,
            refresh_interval_minutes: 5,
            notifications: true,
            theme: Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthPreferences {
    pub is_sensitive_group: bool,
}

/// String key/value persistence, e.g. browser localStorage.
pub trait PreferenceStore {
    fn get_raw(&self, key: &str) -> Option<String>;
    fn set_raw(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str);
}

/// Decode the JSON value under `key`. Corrupt entries are logged and treated
/// as absent.
pub fn load<T: DeserializeOwned>(store: &dyn PreferenceStore, key: &str) -> Option<T> {
    let raw = store.get_raw(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring unreadable preference {}: {}", key, e);
            None
        }
    }
}

pub fn save<T: Serialize>(store: &dyn PreferenceStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set_raw(key, &raw)
}

pub fn load_settings(store: &dyn PreferenceStore) -> AppSettings {
    load(store, APP_SETTINGS_KEY).unwrap_or_default()
}

pub fn load_health_preferences(store: &dyn PreferenceStore) -> HealthPreferences {
    load(store, HEALTH_PREFERENCES_KEY).unwrap_or_default()
}

/// In-memory store for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CitySelection;

    #[test]
    fn test_defaults_when_missing() {
        let store = MemoryStore::new();
        let settings = load_settings(&store);
        assert!(settings.auto_refresh);
        assert_eq!(settings.refresh_interval_minutes, 5);
        assert!(settings.notifications);
        assert_eq!(settings.theme, Theme::Light);
        assert!(!load_health_preferences(&store).is_sensitive_group);
        assert!(load::<CitySelection>(&store, SELECTED_CITY_KEY).is_none());
    }

    #[test]
    fn test_settings_use_camel_case_keys() {
        let store = MemoryStore::new();
        let settings = AppSettings {
            auto_refresh: false,
            refresh_interval_minutes: 10,
            ..Default::default()
        };
        save(&store, APP_SETTINGS_KEY, &settings).unwrap();
        let raw = store.get_raw(APP_SETTINGS_KEY).unwrap();
        assert!(raw.contains("\"autoRefresh\":false"));
        assert!(raw.contains("\"refreshInterval\":10"));
        assert_eq!(load_settings(&store), settings);
    }

    #[test]
    fn test_partial_and_corrupt_entries() {
        let store = MemoryStore::new();
        store
            .set_raw(APP_SETTINGS_KEY, r#"{"theme":"dark"}"#)
            .unwrap();
        let settings = load_settings(&store);
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.auto_refresh);

        store.set_raw(HEALTH_PREFERENCES_KEY, "{not json").unwrap();
        assert!(!load_health_preferences(&store).is_sensitive_group);
    }

    #[test]
    fn test_selected_city_round_trip() {
        let store = MemoryStore::new();
        let city = CitySelection::new("Pune", "Maharashtra");
        save(&store, SELECTED_CITY_KEY, &city).unwrap();
        assert_eq!(load(&store, SELECTED_CITY_KEY), Some(city));
        store.remove(SELECTED_CITY_KEY);
        assert!(store.is_empty());
    }
}
