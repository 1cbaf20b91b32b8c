//! Reader preference persistence

use std::sync::Arc;

use tracing::warn;

use alumni_core::UserPreferences;

use crate::store::{KeyValueStore, StoreError};

pub const FAVORITE_CATEGORIES_KEY: &str = "user_favorite_categories";
pub const MUTED_SOURCES_KEY: &str = "user_muted_sources";

/// Loads and saves [`UserPreferences`] as JSON string arrays under fixed keys
#[derive(Clone)]
pub struct PreferencesStore {
    store: Arc<dyn KeyValueStore>,
}

impl PreferencesStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current preferences; missing or unreadable records read as empty
    pub fn load(&self) -> UserPreferences {
        UserPreferences {
            favorite_categories: self.read_list(FAVORITE_CATEGORIES_KEY),
            muted_sources: self.read_list(MUTED_SOURCES_KEY),
        }
    }

    /// Deduplicate and overwrite both records
    pub fn save(&self, preferences: &UserPreferences) -> Result<(), StoreError> {
        let preferences = preferences.deduplicated();
        self.store.set(
            FAVORITE_CATEGORIES_KEY,
            &serde_json::to_string(&preferences.favorite_categories)?,
        )?;
        self.store.set(
            MUTED_SOURCES_KEY,
            &serde_json::to_string(&preferences.muted_sources)?,
        )?;
        Ok(())
    }

    /// Add or remove a favorite category, returning the saved preferences
    pub fn toggle_favorite_category(&self, category: &str) -> Result<UserPreferences, StoreError> {
        let mut preferences = self.load();
        toggle(&mut preferences.favorite_categories, category);
        self.save(&preferences)?;
        Ok(preferences.deduplicated())
    }

    /// Mute or unmute a source, returning the saved preferences
    pub fn toggle_muted_source(&self, source_id: &str) -> Result<UserPreferences, StoreError> {
        let mut preferences = self.load();
        toggle(&mut preferences.muted_sources, source_id);
        self.save(&preferences)?;
        Ok(preferences.deduplicated())
    }

    fn read_list(&self, key: &str) -> Vec<String> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Discarding corrupt {} record: {}", key, e);
            Vec::new()
        })
    }
}

fn toggle(list: &mut Vec<String>, value: &str) {
    if list.iter().any(|v| v == value) {
        list.retain(|v| v != value);
    } else {
        list.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, SqliteStore};

    #[test]
    fn test_empty_store_loads_defaults() {
        let prefs = PreferencesStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(prefs.load(), UserPreferences::default());
    }

    #[test]
    fn test_save_dedupes_and_round_trips() {
        let store = Arc::new(MemoryStore::new());
        let prefs = PreferencesStore::new(store.clone());

        prefs
            .save(&UserPreferences {
                favorite_categories: vec!["sports".into(), "technology".into(), "sports".into()],
                muted_sources: vec!["ghanaweb".into()],
            })
            .unwrap();

        let loaded = prefs.load();
        assert_eq!(loaded.favorite_categories, vec!["sports", "technology"]);
        assert_eq!(loaded.muted_sources, vec!["ghanaweb"]);
        assert_eq!(
            store.get(FAVORITE_CATEGORIES_KEY).unwrap().as_deref(),
            Some(r#"["sports","technology"]"#)
        );
    }

    #[test]
    fn test_corrupt_record_reads_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(MUTED_SOURCES_KEY, "{not json").unwrap();
        store.set(FAVORITE_CATEGORIES_KEY, r#"["health"]"#).unwrap();

        let loaded = PreferencesStore::new(store).load();
        assert!(loaded.muted_sources.is_empty());
        assert_eq!(loaded.favorite_categories, vec!["health"]);
    }

    #[test]
    fn test_toggles() {
        let prefs = PreferencesStore::new(Arc::new(SqliteStore::in_memory().unwrap()));

        let after_add = prefs.toggle_muted_source("pulsegh").unwrap();
        assert!(after_add.is_muted("pulsegh"));

        prefs.toggle_favorite_category("science").unwrap();
        let after_remove = prefs.toggle_muted_source("pulsegh").unwrap();
        assert!(!after_remove.is_muted("pulsegh"));
        assert_eq!(prefs.load().favorite_categories, vec!["science"]);
    }
}
