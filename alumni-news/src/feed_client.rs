//! Publisher feed client
//!
//! Fetches and parses RSS/Atom feeds from registered publishers, walking each
//! publisher's candidate endpoints until one parses.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use alumni_core::{read_time_minutes, Article, FeedSource, DEFAULT_IMAGE_URL};

use crate::category::infer_category;
use crate::error::NewsError;
use crate::html::{
    clean_title, extract_image_from_html, html_to_text, truncate_summary, SUMMARY_MAX_CHARS,
};

/// Default per-request timeout for publisher feeds
pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(7);

/// How many publishers are fetched at once
const SOURCE_CONCURRENCY: usize = 4;

/// Publisher feed client
pub struct FeedClient {
    client: Client,
    concurrency: usize,
}

impl FeedClient {
    /// Create a new feed client with the default timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_FEED_TIMEOUT)
    }

    /// Create a feed client with a custom per-request timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent("AlumniNews/1.0")
                .build()
                .unwrap_or_else(|_| Client::new()),
            concurrency: SOURCE_CONCURRENCY,
        }
    }

    /// Fetch up to `limit` articles from one publisher.
    ///
    /// Candidates are tried in order and the first one that parses wins.
    /// Returns an empty list when every candidate fails.
    #[instrument(skip(self, source), fields(source = %source.id))]
    pub async fn fetch_publisher_articles(
        &self,
        source: &FeedSource,
        limit: usize,
    ) -> Vec<Article> {
        for (index, url) in source.feed_urls.iter().enumerate() {
            match self.fetch_candidate(source, url).await {
                Ok(mut articles) => {
                    debug!(
                        "Fetched {} items from {} (endpoint {} of {})",
                        articles.len(),
                        source.name,
                        index + 1,
                        source.feed_urls.len()
                    );
                    articles.truncate(limit);
                    return articles;
                }
                Err(e) => {
                    warn!("Feed endpoint {} for {} failed: {}", url, source.name, e);
                }
            }
        }

        warn!(
            "All {} feed endpoints failed for {}",
            source.feed_urls.len(),
            source.name
        );
        Vec::new()
    }

    /// Fetch articles from several publishers, stopping once `limit` are gathered.
    ///
    /// Publishers are fetched concurrently but consumed in the order given, so
    /// the result is deterministic for a given set of responses.
    pub async fn fetch_all_publishers(&self, sources: &[FeedSource], limit: usize) -> Vec<Article> {
        let mut all_items = Vec::new();
        if limit == 0 {
            return all_items;
        }

        let mut results = stream::iter(sources)
            .map(|source| self.fetch_publisher_articles(source, limit))
            .buffered(self.concurrency.max(1));

        while let Some(items) = results.next().await {
            all_items.extend(items);
            if all_items.len() >= limit {
                break;
            }
        }

        all_items.truncate(limit);
        info!(
            "Fetched {} publisher articles from {} sources",
            all_items.len(),
            sources.len()
        );
        all_items
    }

    /// Fetch and parse a single candidate endpoint
    async fn fetch_candidate(
        &self,
        source: &FeedSource,
        url: &str,
    ) -> Result<Vec<Article>, NewsError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(NewsError::ApiError {
                status: response.status().as_u16(),
                message: format!("Failed to fetch {}", url),
            });
        }

        let content = response.bytes().await?;
        parse_feed(&content, source)
    }
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an RSS 2.0 or Atom document into articles for `source`
pub fn parse_feed(content: &[u8], source: &FeedSource) -> Result<Vec<Article>, NewsError> {
    let fetched_at = Utc::now();

    // Try parsing as RSS first, then Atom
    if let Ok(channel) = rss::Channel::read_from(content) {
        return Ok(channel
            .items()
            .iter()
            .filter_map(|item| parse_rss_item(item, source, fetched_at))
            .collect());
    }

    if let Ok(feed) = atom_syndication::Feed::read_from(content) {
        return Ok(feed
            .entries()
            .iter()
            .filter_map(|entry| parse_atom_entry(entry, source, fetched_at))
            .collect());
    }

    Err(NewsError::ParseError(format!(
        "Not an RSS or Atom document for {}",
        source.id
    )))
}

fn parse_rss_item(
    item: &rss::Item,
    source: &FeedSource,
    fetched_at: DateTime<Utc>,
) -> Option<Article> {
    let title = clean_title(item.title()?);
    if title.is_empty() {
        return None;
    }

    let link = non_empty(item.link());
    let guid = non_empty(item.guid().map(|g| g.value()));
    let identity = guid.or(link)?;
    let url = link
        .or_else(|| guid.filter(|g| g.starts_with("http")))
        .unwrap_or_default()
        .to_string();

    let body_html = non_empty(item.content())
        .or_else(|| item.description())
        .unwrap_or_default();
    let summary_html = non_empty(item.description()).unwrap_or(body_html);

    let published_at = item
        .pub_date()
        .and_then(parse_feed_date)
        .unwrap_or(fetched_at);

    let image_url = item
        .enclosure()
        .filter(|e| is_image_mime(e.mime_type()))
        .and_then(|e| non_empty(Some(e.url())))
        .map(str::to_string)
        .or_else(|| media_image(item.extensions().get("media"), rss::extension::Extension::attrs))
        .or_else(|| extract_image_from_html(body_html))
        .or_else(|| extract_image_from_html(summary_html))
        .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

    let author = non_empty(item.author())
        .or_else(|| {
            item.dublin_core_ext()
                .and_then(|dc| non_empty(dc.creators().first().map(String::as_str)))
        })
        .map(str::to_string);

    Some(build_article(
        source,
        identity,
        title,
        url,
        body_html,
        summary_html,
        image_url,
        author,
        published_at,
    ))
}

fn parse_atom_entry(
    entry: &atom_syndication::Entry,
    source: &FeedSource,
    fetched_at: DateTime<Utc>,
) -> Option<Article> {
    let title = clean_title(entry.title().as_str());
    if title.is_empty() {
        return None;
    }

    let link = entry
        .links()
        .iter()
        .find(|l| l.rel() == "alternate")
        .or_else(|| entry.links().first())
        .and_then(|l| non_empty(Some(l.href())));
    let identity = non_empty(Some(entry.id())).or(link)?;
    let url = link.unwrap_or_default().to_string();

    let summary = entry.summary().map(|s| s.as_str());
    let body_html = non_empty(entry.content().and_then(|c| c.value()))
        .or(summary)
        .unwrap_or_default();
    let summary_html = non_empty(summary).unwrap_or(body_html);

    let published_at = entry
        .published()
        .map(|d| d.with_timezone(&Utc))
        .or_else(|| Some(entry.updated().with_timezone(&Utc)))
        .filter(|d| d.timestamp() > 0)
        .unwrap_or(fetched_at);

    let image_url = entry
        .links()
        .iter()
        .find(|l| l.rel() == "enclosure" && is_image_mime(l.mime_type().unwrap_or_default()))
        .and_then(|l| non_empty(Some(l.href())))
        .map(str::to_string)
        .or_else(|| {
            media_image(
                entry.extensions().get("media"),
                atom_syndication::extension::Extension::attrs,
            )
        })
        .or_else(|| extract_image_from_html(body_html))
        .or_else(|| extract_image_from_html(summary_html))
        .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

    let author = entry
        .authors()
        .first()
        .and_then(|p| non_empty(Some(p.name())))
        .map(str::to_string);

    Some(build_article(
        source,
        identity,
        title,
        url,
        body_html,
        summary_html,
        image_url,
        author,
        published_at,
    ))
}

#[allow(clippy::too_many_arguments)]
fn build_article(
    source: &FeedSource,
    identity: &str,
    title: String,
    url: String,
    body_html: &str,
    summary_html: &str,
    image_url: String,
    author: Option<String>,
    published_at: DateTime<Utc>,
) -> Article {
    let body = html_to_text(body_html);
    let summary_text = html_to_text(summary_html);
    let description = truncate_summary(
        if summary_text.is_empty() { &body } else { &summary_text },
        SUMMARY_MAX_CHARS,
    );
    let content = if body.is_empty() { description.clone() } else { body };
    let category = infer_category(&title, &description);

    Article {
        id: format!("{}_{}", source.id, identity),
        read_time_minutes: read_time_minutes(&content),
        title,
        description,
        content,
        url,
        image_url,
        author,
        published_at,
        source: source.article_source(),
        category,
        is_breaking: false,
        is_trending: false,
        is_local: true,
        view_count: 0,
        like_count: 0,
        comment_count: 0,
    }
}

/// First usable URL from a `media:` extension namespace.
///
/// `media:content` is preferred over `media:thumbnail`; audio and video
/// entries are skipped.
fn media_image<E>(
    media: Option<&BTreeMap<String, Vec<E>>>,
    attrs: impl Fn(&E) -> &BTreeMap<String, String>,
) -> Option<String> {
    let media = media?;

    let from_content = media.get("content").and_then(|contents| {
        contents.iter().find_map(|content| {
            let attrs = attrs(content);
            let medium = attrs.get("medium").map(String::as_str).unwrap_or_default();
            let mime = attrs.get("type").map(String::as_str).unwrap_or_default();
            if matches!(medium, "video" | "audio")
                || mime.starts_with("video/")
                || mime.starts_with("audio/")
            {
                return None;
            }
            attrs.get("url").filter(|u| !u.trim().is_empty()).cloned()
        })
    });

    from_content.or_else(|| {
        media.get("thumbnail").and_then(|thumbnails| {
            thumbnails
                .iter()
                .find_map(|t| attrs(t).get("url").filter(|u| !u.trim().is_empty()).cloned())
        })
    })
}

/// Enclosures without a declared type are assumed to be images
fn is_image_mime(mime: &str) -> bool {
    mime.is_empty() || mime.starts_with("image/")
}

fn parse_feed_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|d| d.with_timezone(&Utc))
        .ok()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumni_core::Category;

    fn source() -> FeedSource {
        FeedSource::new(
            "testpub",
            "Test Publisher",
            "https://testpub.example",
            &["https://testpub.example/feed", "https://testpub.example/rss"],
        )
    }

    const RSS_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Test Publisher</title>
    <link>https://testpub.example</link>
    <description>News</description>
    <item>
      <title>Black Stars &amp;#8217; football win</title>
      <link>https://testpub.example/news/1</link>
      <guid isPermaLink="false">post-1</guid>
      <pubDate>Tue, 10 Jun 2025 08:30:00 GMT</pubDate>
      <description><![CDATA[<p>The team won <b>2-0</b>.</p><img src="https://testpub.example/inline.jpg"/>]]></description>
      <enclosure url="https://testpub.example/enclosure.jpg" length="1000" type="image/jpeg"/>
    </item>
    <item>
      <title>Parliament approves budget</title>
      <link>https://testpub.example/news/2</link>
      <description><![CDATA[<script>track()</script><p>Budget passed.</p>]]></description>
      <media:content url="https://testpub.example/media.jpg" medium="image"/>
    </item>
    <item>
      <title>Plain item</title>
      <link>https://testpub.example/news/3</link>
      <description>No pictures here</description>
      <pubDate>not a date</pubDate>
    </item>
    <item>
      <description>Untitled item is skipped</description>
    </item>
  </channel>
</rss>"#;

    const ATOM_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Publisher</title>
  <id>urn:atom-publisher</id>
  <updated>2025-06-10T10:00:00Z</updated>
  <entry>
    <title>New study on cocoa yields</title>
    <id>urn:entry:42</id>
    <link rel="alternate" href="https://atom.example/cocoa"/>
    <updated>2025-06-10T09:00:00Z</updated>
    <published>2025-06-10T08:00:00Z</published>
    <summary>Researchers publish findings.</summary>
    <content type="html">&lt;p&gt;Full &lt;em&gt;body&lt;/em&gt; text.&lt;/p&gt;&lt;img src="https://atom.example/body.jpg"&gt;</content>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss_items() {
        let articles = parse_feed(RSS_FEED.as_bytes(), &source()).unwrap();
        assert_eq!(articles.len(), 3);

        let first = &articles[0];
        assert_eq!(first.id, "testpub_post-1");
        assert_eq!(first.title, "Black Stars ’ football win");
        assert_eq!(first.url, "https://testpub.example/news/1");
        assert_eq!(first.description, "The team won 2-0.");
        assert_eq!(first.content, first.description);
        assert_eq!(first.category, Category::Sports);
        assert!(first.is_local);
        assert_eq!(first.source.id, "testpub");
        assert_eq!(first.published_at.to_rfc3339(), "2025-06-10T08:30:00+00:00");
    }

    #[test]
    fn test_enclosure_wins_over_inline_image() {
        let articles = parse_feed(RSS_FEED.as_bytes(), &source()).unwrap();
        assert_eq!(articles[0].image_url, "https://testpub.example/enclosure.jpg");
    }

    #[test]
    fn test_media_content_and_script_stripping() {
        let articles = parse_feed(RSS_FEED.as_bytes(), &source()).unwrap();
        let second = &articles[1];
        assert_eq!(second.id, "testpub_https://testpub.example/news/2");
        assert_eq!(second.image_url, "https://testpub.example/media.jpg");
        assert_eq!(second.description, "Budget passed.");
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let before = Utc::now();
        let articles = parse_feed(RSS_FEED.as_bytes(), &source()).unwrap();
        let third = &articles[2];
        assert_eq!(third.image_url, DEFAULT_IMAGE_URL);
        assert!(third.published_at >= before);
        assert_eq!(third.read_time_minutes, 1);
    }

    #[test]
    fn test_parse_atom_entry() {
        let articles = parse_feed(ATOM_FEED.as_bytes(), &source()).unwrap();
        assert_eq!(articles.len(), 1);

        let entry = &articles[0];
        assert_eq!(entry.id, "testpub_urn:entry:42");
        assert_eq!(entry.url, "https://atom.example/cocoa");
        assert_eq!(entry.description, "Researchers publish findings.");
        assert_eq!(entry.content, "Full body text.");
        assert_eq!(entry.image_url, "https://atom.example/body.jpg");
        assert_eq!(entry.category, Category::Science);
        assert_eq!(entry.published_at.to_rfc3339(), "2025-06-10T08:00:00+00:00");
    }

    const RSS_MEDIA_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Media Publisher</title>
    <link>https://media.example</link>
    <description>News</description>
    <item>
      <title>Highlights from the derby</title>
      <link>https://media.example/derby</link>
      <media:content url="https://media.example/derby.mp4" type="video/mp4" medium="video"/>
      <media:content url="https://media.example/derby-still.jpg" type="image/jpeg"/>
      <media:content url="https://media.example/derby-alt.jpg" type="image/jpeg"/>
    </item>
    <item>
      <title>Morning bulletin</title>
      <link>https://media.example/bulletin</link>
      <media:content url="https://media.example/bulletin.mp3" medium="audio"/>
      <media:thumbnail url="https://media.example/bulletin-thumb.jpg"/>
    </item>
    <item>
      <title>Orphaned story without identity</title>
      <description>Neither guid nor link</description>
    </item>
  </channel>
</rss>"#;

    const ATOM_ENCLOSURE_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Publisher</title>
  <id>urn:atom-publisher</id>
  <updated>2025-06-10T10:00:00Z</updated>
  <entry>
    <title>Harbour expansion opens</title>
    <id>urn:entry:harbour</id>
    <link rel="alternate" href="https://atom.example/harbour"/>
    <link rel="enclosure" type="image/jpeg" href="https://atom.example/harbour-cover.jpg"/>
    <updated>2025-06-10T09:00:00Z</updated>
    <content type="html">&lt;p&gt;Ships dock.&lt;/p&gt;&lt;img src="https://atom.example/harbour-inline.jpg"&gt;</content>
  </entry>
</feed>"#;

    #[test]
    fn test_first_image_media_content_skips_video() {
        let articles = parse_feed(RSS_MEDIA_FEED.as_bytes(), &source()).unwrap();
        assert_eq!(articles[0].image_url, "https://media.example/derby-still.jpg");
    }

    #[test]
    fn test_media_thumbnail_when_content_is_audio() {
        let articles = parse_feed(RSS_MEDIA_FEED.as_bytes(), &source()).unwrap();
        assert_eq!(articles[1].image_url, "https://media.example/bulletin-thumb.jpg");
    }

    #[test]
    fn test_items_without_guid_or_link_are_skipped() {
        let articles = parse_feed(RSS_MEDIA_FEED.as_bytes(), &source()).unwrap();
        assert_eq!(articles.len(), 2);
        assert!(articles.iter().all(|a| !a.title.starts_with("Orphaned")));
    }

    #[test]
    fn test_atom_enclosure_link_wins_over_inline_image() {
        let articles = parse_feed(ATOM_ENCLOSURE_FEED.as_bytes(), &source()).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].image_url, "https://atom.example/harbour-cover.jpg");
        assert_eq!(articles[0].url, "https://atom.example/harbour");
    }

    #[test]
    fn test_rejects_non_feed_documents() {
        let result = parse_feed(b"<html><body>Not found</body></html>", &source());
        assert!(matches!(result, Err(NewsError::ParseError(_))));
    }
}
