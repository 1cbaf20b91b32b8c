//! Headline provider abstraction
//!
//! The real provider client and the static sample-data provider share this
//! contract, so callers that need to see failures (the cache, the hybrid
//! feed builder) can work against either.

use async_trait::async_trait;

use alumni_core::{Article, Category};

use crate::error::NewsError;

/// Parameters for a top-headlines query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineQuery {
    /// Two-letter country code
    pub country: String,
    pub category: Option<Category>,
    pub search: Option<String>,
}

impl HeadlineQuery {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            category: None,
            search: None,
        }
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.trim().is_empty());
        self
    }

    /// Breaking queries mark every result as breaking and none as trending
    pub fn is_breaking(&self) -> bool {
        self.category == Some(Category::Breaking)
    }
}

/// A source of normalized headline articles
#[async_trait]
pub trait HeadlineProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Top headlines for a country, optionally narrowed by category or search text
    async fn top_headlines(&self, query: &HeadlineQuery) -> Result<Vec<Article>, NewsError>;

    /// Free-text search across all indexed articles
    async fn search(
        &self,
        query: &str,
        category: Option<Category>,
    ) -> Result<Vec<Article>, NewsError>;
}
