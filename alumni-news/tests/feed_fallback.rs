//! Publisher feed endpoint fallback against a local HTTP server
//!
//! Run with: cargo test -p alumni-news --test feed_fallback

use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::Router;

use alumni_core::FeedSource;
use alumni_news::FeedClient;

const ATOM_ONE_ENTRY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Second Endpoint</title>
  <id>urn:second</id>
  <updated>2025-06-10T10:00:00Z</updated>
  <entry>
    <title>Alumni homecoming set for December</title>
    <id>urn:entry:homecoming</id>
    <link rel="alternate" href="https://publisher.example/homecoming"/>
    <updated>2025-06-10T09:00:00Z</updated>
    <summary>Organisers expect a record turnout.</summary>
  </entry>
</feed>"#;

const RSS_THREE_ITEMS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>First</title><link>https://first.example</link><description>d</description>
<item><title>One</title><link>https://first.example/1</link></item>
<item><title>Two</title><link>https://first.example/2</link></item>
<item><title>Three</title><link>https://first.example/3</link></item>
</channel></rss>"#;

const RSS_ONE_ITEM: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>Other</title><link>https://other.example</link><description>d</description>
<item><title>Other story</title><link>https://other.example/1</link></item>
</channel></rss>"#;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn router() -> Router {
    Router::new()
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        )
        .route("/html", get(|| async { "<html><body>Moved</body></html>" }))
        .route(
            "/atom",
            get(|| async { ([(header::CONTENT_TYPE, "application/atom+xml")], ATOM_ONE_ENTRY) }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                ATOM_ONE_ENTRY
            }),
        )
        .route("/first.xml", get(|| async { RSS_THREE_ITEMS }))
        .route("/other.xml", get(|| async { RSS_ONE_ITEM }))
}

fn source(id: &str, urls: Vec<String>) -> FeedSource {
    FeedSource {
        id: id.to_string(),
        name: id.to_uppercase(),
        site_url: "https://publisher.example".to_string(),
        logo: None,
        feed_urls: urls,
    }
}

#[tokio::test]
async fn test_server_error_falls_through_to_atom_endpoint() {
    let base = serve(router()).await;
    let source = source("pub", vec![format!("{}/broken", base), format!("{}/atom", base)]);

    let articles = FeedClient::new().fetch_publisher_articles(&source, 10).await;

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Alumni homecoming set for December");
    assert_eq!(articles[0].url, "https://publisher.example/homecoming");
    assert_eq!(articles[0].id, "pub_urn:entry:homecoming");
    assert!(articles[0].is_local);
}

#[tokio::test]
async fn test_malformed_body_falls_through() {
    let base = serve(router()).await;
    let source = source("pub", vec![format!("{}/html", base), format!("{}/atom", base)]);

    let articles = FeedClient::new().fetch_publisher_articles(&source, 10).await;
    assert_eq!(articles.len(), 1);
}

#[tokio::test]
async fn test_every_candidate_failing_yields_empty() {
    let base = serve(router()).await;
    let source = source(
        "pub",
        vec![
            format!("{}/broken", base),
            format!("{}/html", base),
            format!("{}/missing", base),
        ],
    );

    let articles = FeedClient::new().fetch_publisher_articles(&source, 10).await;
    assert!(articles.is_empty());
}

#[tokio::test]
async fn test_timed_out_candidate_is_abandoned() {
    let base = serve(router()).await;
    let source = source("pub", vec![format!("{}/slow", base), format!("{}/first.xml", base)]);

    let client = FeedClient::with_timeout(Duration::from_millis(300));
    let articles = client.fetch_publisher_articles(&source, 10).await;

    assert_eq!(articles.len(), 3);
    assert_eq!(articles[0].url, "https://first.example/1");
}

#[tokio::test]
async fn test_limit_caps_single_source() {
    let base = serve(router()).await;
    let source = source("pub", vec![format!("{}/first.xml", base)]);

    let articles = FeedClient::new().fetch_publisher_articles(&source, 2).await;
    assert_eq!(articles.len(), 2);
}

#[tokio::test]
async fn test_multi_source_collection_stops_at_limit() {
    let base = serve(router()).await;
    let sources = vec![
        source("first", vec![format!("{}/first.xml", base)]),
        source("other", vec![format!("{}/other.xml", base)]),
    ];

    let client = FeedClient::new();

    let capped = client.fetch_all_publishers(&sources, 3).await;
    assert_eq!(capped.len(), 3);
    assert!(capped.iter().all(|a| a.source.id == "first"));

    let everything = client.fetch_all_publishers(&sources, 10).await;
    assert_eq!(everything.len(), 4);
    assert_eq!(everything[3].source.id, "other");
}

#[tokio::test]
async fn test_failed_source_does_not_abort_others() {
    let base = serve(router()).await;
    let sources = vec![
        source("down", vec![format!("{}/broken", base)]),
        source("other", vec![format!("{}/other.xml", base)]),
    ];

    let articles = FeedClient::new().fetch_all_publishers(&sources, 10).await;
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].source.id, "other");
}
