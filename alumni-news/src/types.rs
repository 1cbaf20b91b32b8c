//! Headline provider wire types

use serde::Deserialize;

/// Top-level provider response for both `top-headlines` and `everything`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResponse {
    /// "ok" on success, "error" otherwise
    pub status: String,
    #[serde(default)]
    pub total_results: Option<u32>,
    #[serde(default)]
    pub articles: Vec<ProviderArticle>,
    /// Error code when `status` is not "ok"
    #[serde(default)]
    pub code: Option<String>,
    /// Error message when `status` is not "ok"
    #[serde(default)]
    pub message: Option<String>,
}

impl ProviderResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// A single article as the provider returns it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderArticle {
    pub source: ProviderSource,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    /// ISO-8601 publication time
    #[serde(default)]
    pub published_at: Option<String>,
    /// Truncated body, usually ending in "[+N chars]"
    #[serde(default)]
    pub content: Option<String>,
}

/// Provider's source reference
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok_response() {
        let json = r#"{
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "source": {"id": null, "name": "Citi Newsroom"},
                "author": null,
                "title": "Cedi gains against dollar",
                "description": null,
                "url": "https://citinewsroom.com/cedi",
                "urlToImage": null,
                "publishedAt": "2025-06-10T08:00:00Z",
                "content": null
            }]
        }"#;

        let response: ProviderResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_ok());
        assert_eq!(response.total_results, Some(1));
        assert_eq!(response.articles[0].source.name.as_deref(), Some("Citi Newsroom"));
        assert!(response.articles[0].source.id.is_none());
    }

    #[test]
    fn test_parse_error_response() {
        let json = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        let response: ProviderResponse = serde_json::from_str(json).unwrap();
        assert!(!response.is_ok());
        assert!(response.articles.is_empty());
        assert_eq!(response.code.as_deref(), Some("apiKeyInvalid"));
    }
}
