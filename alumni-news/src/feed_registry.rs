//! Registry of publisher feeds
//!
//! Publishers expose their syndication feeds at inconsistent paths that move
//! without notice, so each entry lists several candidates in preference order.

use alumni_core::FeedSource;

/// All known publishers
pub fn list_sources() -> Vec<FeedSource> {
    vec![
        FeedSource::new(
            "myjoyonline",
            "MyJoyOnline",
            "https://www.myjoyonline.com",
            &[
                "https://www.myjoyonline.com/feed/",
                "https://www.myjoyonline.com/news/feed/",
                "https://myjoyonline.com/feed",
            ],
        ),
        FeedSource::new(
            "citinewsroom",
            "Citi Newsroom",
            "https://citinewsroom.com",
            &[
                "https://citinewsroom.com/feed/",
                "https://citinewsroom.com/news/feed/",
            ],
        ),
        FeedSource::new(
            "ghanaweb",
            "GhanaWeb",
            "https://www.ghanaweb.com",
            &[
                "https://www.ghanaweb.com/GhanaHomePage/NewsArchive/rss.xml",
                "https://www.ghanaweb.com/feed/newsfeed.xml",
            ],
        ),
        FeedSource::new(
            "graphic",
            "Graphic Online",
            "https://www.graphic.com.gh",
            &[
                "https://www.graphic.com.gh/news.feed?type=rss",
                "https://www.graphic.com.gh/news/general-news.feed?type=rss",
                "https://www.graphic.com.gh/rss",
            ],
        ),
        FeedSource::new(
            "3news",
            "3News",
            "https://3news.com",
            &["https://3news.com/feed/", "https://3news.com/news/feed/"],
        ),
        FeedSource::new(
            "modernghana",
            "Modern Ghana",
            "https://www.modernghana.com",
            &[
                "https://www.modernghana.com/rssfeed/news.xml",
                "https://www.modernghana.com/feed/",
            ],
        ),
        FeedSource::new(
            "pulsegh",
            "Pulse Ghana",
            "https://www.pulse.com.gh",
            &[
                "https://www.pulse.com.gh/news/rss",
                "https://www.pulse.com.gh/rss",
            ],
        ),
    ]
}

/// Look up a single publisher by id
pub fn find_source(id: &str) -> Option<FeedSource> {
    list_sources().into_iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_source_has_fallback_endpoints() {
        let sources = list_sources();
        assert!(!sources.is_empty());
        for source in &sources {
            assert!(source.feed_urls.len() >= 2, "{} has a single endpoint", source.id);
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let sources = list_sources();
        let ids: std::collections::HashSet<_> = sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), sources.len());
    }

    #[test]
    fn test_find_source() {
        assert_eq!(find_source("citinewsroom").unwrap().name, "Citi Newsroom");
        assert!(find_source("unknown").is_none());
    }
}
