//! Prints the blended "for you" page and a category page
//!
//! Run with: cargo run -p alumni-services --example hybrid_feed

use alumni_core::Category;
use alumni_news::NewsConfig;
use alumni_services::{NewsFilter, NewsService, PreferencesStore, SortOrder, SqliteStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,alumni_services=debug,alumni_news=debug")),
        )
        .init();

    let config = NewsConfig::from_env()?;
    let store = Arc::new(SqliteStore::open(&config.cache_db_path)?);
    let preferences = PreferencesStore::new(store.clone()).load();
    let service = NewsService::new(&config, store);

    let page = service
        .articles(&NewsFilter::for_you().with_preferences(&preferences))
        .await;
    info!("For you: {} articles", page.len());
    for article in &page {
        println!(
            "{} | {:<13} | {:<18} | {}",
            article.published_at.format("%Y-%m-%d %H:%M"),
            article.category.display_name(),
            article.source.name,
            article.title
        );
    }

    let tech = service
        .articles(&NewsFilter::category(Category::Technology).with_sort(SortOrder::Popular))
        .await;
    info!("Technology: {} articles", tech.len());
    for article in tech.iter().take(5) {
        println!("{:>6} views | {}", article.view_count, article.title);
    }

    Ok(())
}
