//! Canonical article model shared by every news source

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Category;

/// Placeholder image used when a source supplies none
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1504711434969-e33886168f5c?w=800&q=80";

/// Reading speed used for read-time estimates
pub const WORDS_PER_MINUTE: usize = 200;

/// Publisher of an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSource {
    /// Stable source identifier (registry id or provider source id)
    pub id: String,
    /// Display name (e.g., "MyJoyOnline", "BBC News")
    pub name: String,
    /// URL to the source's logo or favicon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// URL of the source's website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
}

/// A normalized news article
///
/// Built once during normalization and never edited afterwards; blending and
/// caching replace whole collections of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Stable identifier, unique within a deduplicated result set
    pub id: String,
    pub title: String,
    /// Plain-text summary
    pub description: String,
    /// Full plain-text body (the description when no body exists)
    pub content: String,
    /// Article URL (empty only when the source supplies none)
    pub url: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub published_at: DateTime<Utc>,
    pub source: ArticleSource,
    pub category: Category,
    #[serde(default)]
    pub is_breaking: bool,
    #[serde(default)]
    pub is_trending: bool,
    pub read_time_minutes: u32,
    /// True for articles that came from a publisher feed
    #[serde(default)]
    pub is_local: bool,
    /// Synthesized engagement placeholders, not real analytics
    #[serde(default)]
    pub view_count: u32,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub comment_count: u32,
}

impl Article {
    /// Key used for deduplication: the id, or the url when the id is empty
    pub fn dedup_key(&self) -> &str {
        if self.id.is_empty() {
            &self.url
        } else {
            &self.id
        }
    }
}

/// Estimate reading time in whole minutes, never less than one
pub fn read_time_minutes(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    (words / WORDS_PER_MINUTE).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_time_floor() {
        assert_eq!(read_time_minutes(""), 1);
        assert_eq!(read_time_minutes("a few words only"), 1);
    }

    #[test]
    fn test_read_time_long_text() {
        let text = "word ".repeat(650);
        assert_eq!(read_time_minutes(&text), 3);
    }

    #[test]
    fn test_serializes_camel_case() {
        let article = Article {
            id: "a1".to_string(),
            title: "Title".to_string(),
            description: "Desc".to_string(),
            content: "Desc".to_string(),
            url: "https://example.com/a1".to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            author: None,
            published_at: Utc::now(),
            source: ArticleSource {
                id: "example".to_string(),
                name: "Example".to_string(),
                logo_url: None,
                site_url: None,
            },
            category: Category::World,
            is_breaking: false,
            is_trending: true,
            read_time_minutes: 1,
            is_local: false,
            view_count: 0,
            like_count: 0,
            comment_count: 0,
        };

        let value = serde_json::to_value(&article).unwrap();
        assert!(value.get("imageUrl").is_some());
        assert!(value.get("publishedAt").is_some());
        assert_eq!(value["isTrending"], serde_json::Value::Bool(true));
        assert!(value.get("author").is_none());
    }
}
