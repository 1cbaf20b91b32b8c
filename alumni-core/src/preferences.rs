//! User news preferences

use serde::{Deserialize, Serialize};

/// Two small lists persisted for screens outside the news core
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub favorite_categories: Vec<String>,
    #[serde(default)]
    pub muted_sources: Vec<String>,
}

impl UserPreferences {
    /// Copy with both lists deduplicated, keeping first occurrences
    pub fn deduplicated(&self) -> Self {
        Self {
            favorite_categories: dedup_preserving_order(&self.favorite_categories),
            muted_sources: dedup_preserving_order(&self.muted_sources),
        }
    }

    pub fn is_muted(&self, source_id: &str) -> bool {
        self.muted_sources.iter().any(|s| s == source_id)
    }
}

fn dedup_preserving_order(items: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.as_str()))
        .cloned()
        .collect()
}
