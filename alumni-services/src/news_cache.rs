//! News Cache
//!
//! Two-tier article cache keyed by filter signature: an in-process map in
//! front of a persisted [`KeyValueStore`]. Fresh entries short-circuit the
//! producer; when a refresh fails the last good entry is served whatever its
//! age.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use alumni_core::Article;
use alumni_news::NewsError;

use crate::store::{KeyValueStore, MemoryStore, StoreError};

/// Prefix shared by every persisted cache record
pub const CACHE_KEY_PREFIX: &str = "news_cache_";

/// How long an entry is served without refreshing (5 minutes)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Build the cache key for a request filter
pub fn filter_signature(category: &str, search_query: &str, sources: &[String]) -> String {
    format!(
        "{}{}_{}_{}",
        CACHE_KEY_PREFIX,
        category,
        search_query.trim(),
        sources.join(",")
    )
}

/// One cached fetch result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(rename = "data")]
    pub articles: Vec<Article>,
    /// Write time, epoch milliseconds
    pub timestamp: i64,
    pub category: String,
    #[serde(skip)]
    pub filter_signature: String,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration, now_ms: i64) -> bool {
        let age_ms = now_ms - self.timestamp;
        i128::from(age_ms) < ttl.as_millis() as i128
    }
}

/// Where a cache answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOrigin {
    /// Served from an entry inside the TTL
    Fresh,
    /// Producer ran and its result was stored
    Fetched,
    /// Producer failed; the previous entry was served
    Stale,
    /// Producer failed and nothing was cached
    Miss,
}

#[derive(Debug, Clone)]
pub struct CacheLookup {
    pub articles: Vec<Article>,
    pub origin: CacheOrigin,
}

/// Article cache with in-memory + persisted backing
pub struct NewsCache {
    entries: RwLock<HashMap<String, Arc<CacheEntry>>>,
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl NewsCache {
    /// Create a cache persisting through `store`
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            store,
            ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Cache whose persisted tier is a volatile map
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Return cached articles for `signature`, refreshing through `producer`
    /// when the entry is missing or older than the TTL.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        signature: &str,
        category: &str,
        producer: F,
    ) -> Vec<Article>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Article>, NewsError>>,
    {
        self.lookup(signature, category, producer).await.articles
    }

    /// Like [`get_or_fetch`](Self::get_or_fetch), also reporting where the answer came from
    pub async fn lookup<F, Fut>(&self, signature: &str, category: &str, producer: F) -> CacheLookup
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Article>, NewsError>>,
    {
        let previous = self.get(signature);

        if let Some(entry) = &previous {
            if entry.is_fresh(self.ttl, Utc::now().timestamp_millis()) {
                debug!("Cache hit for {}", signature);
                return CacheLookup {
                    articles: entry.articles.clone(),
                    origin: CacheOrigin::Fresh,
                };
            }
        }

        match producer().await {
            Ok(articles) => {
                let entry = Arc::new(CacheEntry {
                    articles,
                    timestamp: Utc::now().timestamp_millis(),
                    category: category.to_string(),
                    filter_signature: signature.to_string(),
                });

                self.entries
                    .write()
                    .insert(signature.to_string(), Arc::clone(&entry));
                if let Err(e) = self.persist(&entry) {
                    warn!("Failed to persist cache entry {}: {}", signature, e);
                }

                info!("Cached {} articles for {}", entry.articles.len(), signature);
                CacheLookup {
                    articles: entry.articles.clone(),
                    origin: CacheOrigin::Fetched,
                }
            }
            Err(e) => match previous {
                Some(entry) => {
                    warn!("Refresh failed for {}, serving stale entry: {}", signature, e);
                    CacheLookup {
                        articles: entry.articles.clone(),
                        origin: CacheOrigin::Stale,
                    }
                }
                None => {
                    warn!("Refresh failed for {} with nothing cached: {}", signature, e);
                    CacheLookup {
                        articles: Vec::new(),
                        origin: CacheOrigin::Miss,
                    }
                }
            },
        }
    }

    /// Current entry for `signature`, in-process first, then persisted
    pub fn get(&self, signature: &str) -> Option<Arc<CacheEntry>> {
        if let Some(entry) = self.entries.read().get(signature) {
            return Some(Arc::clone(entry));
        }

        let entry = match self.load_persisted(signature) {
            Ok(entry) => entry?,
            Err(e) => {
                warn!("Ignoring unreadable cache record {}: {}", signature, e);
                return None;
            }
        };

        let entry = Arc::new(entry);
        self.entries
            .write()
            .insert(signature.to_string(), Arc::clone(&entry));
        Some(entry)
    }

    /// Drop every in-process and persisted entry
    pub fn clear_cache(&self) {
        self.entries.write().clear();

        match self.store.keys_with_prefix(CACHE_KEY_PREFIX) {
            Ok(keys) => {
                for key in &keys {
                    if let Err(e) = self.store.remove(key) {
                        warn!("Failed to remove cache record {}: {}", key, e);
                    }
                }
                info!("Cleared {} persisted cache records", keys.len());
            }
            Err(e) => warn!("Failed to list cache records: {}", e),
        }
    }

    fn persist(&self, entry: &CacheEntry) -> Result<(), StoreError> {
        let json = serde_json::to_string(entry)?;
        self.store.set(&entry.filter_signature, &json)
    }

    fn load_persisted(&self, signature: &str) -> Result<Option<CacheEntry>, StoreError> {
        let Some(json) = self.store.get(signature)? else {
            return Ok(None);
        };

        let mut entry: CacheEntry = serde_json::from_str(&json)?;
        entry.filter_signature = signature.to_string();
        debug!("Loaded persisted cache entry for {}", signature);
        Ok(Some(entry))
    }
}
