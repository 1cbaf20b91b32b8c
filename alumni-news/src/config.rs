//! News core configuration

use std::env;
use std::time::Duration;

/// Default headline provider endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://newsapi.org/v2";

/// Configuration resolved once at startup
#[derive(Debug, Clone)]
pub struct NewsConfig {
    /// Headline provider API key; `None` routes every headline query to sample data
    pub api_key: Option<String>,
    /// Country code whose headlines dominate the hybrid feed
    pub primary_locale: String,
    /// Country codes blended in after the primary locale, in priority order
    pub secondary_locales: Vec<String>,
    /// Headline provider base URL
    pub api_base_url: String,
    /// Page size requested from the headline provider
    pub page_size: usize,
    /// Timeout applied to each publisher feed request
    pub feed_timeout: Duration,
    /// Timeout applied to headline provider requests
    pub api_timeout: Duration,
    /// SQLite file backing the persisted cache
    pub cache_db_path: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            primary_locale: "gh".to_string(),
            secondary_locales: vec!["us".to_string(), "gb".to_string(), "ng".to_string()],
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: 20,
            feed_timeout: Duration::from_secs(7),
            api_timeout: Duration::from_secs(10),
            cache_db_path: "data/news_cache.db".to_string(),
        }
    }
}

impl NewsConfig {
    /// Load configuration from environment variables
    ///
    /// Reads:
    /// - NEWS_API_KEY: headline provider key (empty counts as absent)
    /// - NEWS_PRIMARY_LOCALE: primary country code (default `gh`)
    /// - NEWS_SECONDARY_LOCALES: comma-separated country codes (default `us,gb,ng`)
    /// - NEWS_API_BASE_URL, NEWS_PAGE_SIZE, NEWS_FEED_TIMEOUT_SECS, NEWS_CACHE_DB_PATH
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_key = env::var("NEWS_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let primary_locale = env::var("NEWS_PRIMARY_LOCALE")
            .ok()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or(defaults.primary_locale);

        let secondary_locales = match env::var("NEWS_SECONDARY_LOCALES") {
            Ok(csv) => parse_locales(&csv),
            Err(_) => defaults.secondary_locales,
        };

        let api_base_url = env::var("NEWS_API_BASE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(defaults.api_base_url);

        let page_size = match env::var("NEWS_PAGE_SIZE") {
            Ok(raw) => parse_number("NEWS_PAGE_SIZE", &raw)? as usize,
            Err(_) => defaults.page_size,
        };

        let feed_timeout = match env::var("NEWS_FEED_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(parse_number("NEWS_FEED_TIMEOUT_SECS", &raw)?),
            Err(_) => defaults.feed_timeout,
        };

        let cache_db_path = env::var("NEWS_CACHE_DB_PATH").unwrap_or(defaults.cache_db_path);

        Ok(Self {
            api_key,
            primary_locale,
            secondary_locales,
            api_base_url,
            page_size,
            feed_timeout,
            api_timeout: defaults.api_timeout,
            cache_db_path,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Split a comma-separated locale list, dropping blanks
pub fn parse_locales(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect()
}

fn parse_number(field: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid number in {field}: {value}")]
    InvalidNumber { field: String, value: String },
}
