//! Service layer for the alumni news core
//!
//! Sits on top of `alumni-news` and provides:
//! - [`NewsService`]: request routing, caching and sorting for screens
//! - [`NewsCache`]: TTL cache with stale-while-error and a persisted mirror
//! - [`HybridFeedBuilder`]: the weighted multi-locale "for you" page
//! - [`PreferencesStore`]: favorite categories and muted sources

pub mod blend;
pub mod news_cache;
pub mod news_service;
pub mod preferences;
pub mod store;

pub use blend::{
    blend_weighted, dedupe_articles, sort_by_recency, HybridFeedBuilder, HYBRID_PAGE_SIZE,
};
pub use news_cache::{
    filter_signature, CacheEntry, CacheLookup, CacheOrigin, NewsCache, DEFAULT_CACHE_TTL,
};
pub use news_service::{NewsFilter, NewsService, NewsView, SortOrder};
pub use preferences::PreferencesStore;
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError};
