//! News categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of topic tags an article can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Breaking,
    World,
    Ghana,
    Business,
    Technology,
    Sports,
    Health,
    Science,
    Entertainment,
    Politics,
    General,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 11] = [
        Category::Breaking,
        Category::World,
        Category::Ghana,
        Category::Business,
        Category::Technology,
        Category::Sports,
        Category::Health,
        Category::Science,
        Category::Entertainment,
        Category::Politics,
        Category::General,
    ];

    /// Lowercase tag used in cache keys and persisted records
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breaking => "breaking",
            Category::World => "world",
            Category::Ghana => "ghana",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Sports => "sports",
            Category::Health => "health",
            Category::Science => "science",
            Category::Entertainment => "entertainment",
            Category::Politics => "politics",
            Category::General => "general",
        }
    }

    /// Get the full display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Breaking => "Breaking",
            Category::World => "World",
            Category::Ghana => "Ghana",
            Category::Business => "Business",
            Category::Technology => "Technology",
            Category::Sports => "Sports",
            Category::Health => "Health",
            Category::Science => "Science",
            Category::Entertainment => "Entertainment",
            Category::Politics => "Politics",
            Category::General => "General",
        }
    }

    /// Category name understood by the headline provider's `category` parameter.
    ///
    /// Returns `None` for tags the provider has no equivalent for; those
    /// queries go out uncategorized.
    pub fn provider_category(&self) -> Option<&'static str> {
        match self {
            Category::Business => Some("business"),
            Category::Technology => Some("technology"),
            Category::Sports => Some("sports"),
            Category::Health => Some("health"),
            Category::Science => Some("science"),
            Category::Entertainment => Some("entertainment"),
            Category::General => Some("general"),
            Category::Breaking | Category::World | Category::Ghana | Category::Politics => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breaking" => Ok(Category::Breaking),
            "world" => Ok(Category::World),
            "ghana" | "local" => Ok(Category::Ghana),
            "business" => Ok(Category::Business),
            "technology" | "tech" => Ok(Category::Technology),
            "sports" | "sport" => Ok(Category::Sports),
            "health" => Ok(Category::Health),
            "science" => Ok(Category::Science),
            "entertainment" => Ok(Category::Entertainment),
            "politics" => Ok(Category::Politics),
            "general" => Ok(Category::General),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}
