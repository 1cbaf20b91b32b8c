//! Publisher feed configuration

use serde::{Deserialize, Serialize};

use crate::ArticleSource;

/// A publisher exposing one or more syndication feeds
///
/// `feed_urls` is ordered: the first endpoint that parses wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSource {
    pub id: String,
    pub name: String,
    pub site_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub feed_urls: Vec<String>,
}

impl FeedSource {
    pub fn new(id: &str, name: &str, site_url: &str, feed_urls: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            site_url: site_url.to_string(),
            logo: Some(format!("{}/favicon.ico", site_url.trim_end_matches('/'))),
            feed_urls: feed_urls.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Source descriptor attached to articles from this publisher
    pub fn article_source(&self) -> ArticleSource {
        ArticleSource {
            id: self.id.clone(),
            name: self.name.clone(),
            logo_url: self.logo.clone(),
            site_url: Some(self.site_url.clone()),
        }
    }
}
