//! Hybrid feed blending
//!
//! Merges the primary locale's headlines with a set of secondary locales,
//! weighting the page towards the primary locale.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use alumni_core::Article;
use alumni_news::{HeadlineProvider, HeadlineQuery};

/// Articles in one hybrid page
pub const HYBRID_PAGE_SIZE: usize = 20;

/// Share of the page reserved for the primary locale, as a ratio (60%)
pub const PRIMARY_SHARE: (usize, usize) = (3, 5);

/// Maximum number of primary articles in a page of `target` items
pub fn primary_quota(target: usize) -> usize {
    let (num, den) = PRIMARY_SHARE;
    (target * num).div_ceil(den)
}

/// Remove duplicates by id (or url when the id is empty), keeping first occurrence
pub fn dedupe_articles(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|article| seen.insert(article.dedup_key().to_string()))
        .collect()
}

/// Stable sort, newest first
pub fn sort_by_recency(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

/// Blend primary and secondary articles into a page of at most `target` items.
///
/// Up to 60% of the page comes from `primary`; the remainder is filled from
/// `secondaries` in the order given, skipping anything already on the page.
/// The page is returned newest first.
pub fn blend_weighted(
    primary: Vec<Article>,
    secondaries: Vec<Vec<Article>>,
    target: usize,
) -> Vec<Article> {
    let primary = dedupe_articles(primary);
    let quota = primary_quota(target).min(primary.len());

    let mut page: Vec<Article> = primary.into_iter().take(quota).collect();
    let mut seen: HashSet<String> = page.iter().map(|a| a.dedup_key().to_string()).collect();

    let remaining = target.saturating_sub(page.len());
    let fill: Vec<Article> = secondaries
        .into_iter()
        .flat_map(dedupe_articles)
        .filter(|article| seen.insert(article.dedup_key().to_string()))
        .take(remaining)
        .collect();

    debug!("Blended {} primary + {} secondary articles", page.len(), fill.len());
    page.extend(fill);
    sort_by_recency(&mut page);
    page
}

/// Builds the weighted multi-locale "for you" page from a headline provider
pub struct HybridFeedBuilder {
    provider: Arc<dyn HeadlineProvider>,
    target: usize,
}

impl HybridFeedBuilder {
    pub fn new(provider: Arc<dyn HeadlineProvider>) -> Self {
        Self {
            provider,
            target: HYBRID_PAGE_SIZE,
        }
    }

    pub fn with_target(mut self, target: usize) -> Self {
        self.target = target;
        self
    }

    /// Fetch every locale concurrently and blend the results.
    ///
    /// A locale whose fetch fails contributes nothing; it never fails the page.
    pub async fn build(&self, primary_locale: &str, secondary_locales: &[String]) -> Vec<Article> {
        let primary = self.fetch_locale(primary_locale);
        let secondaries = join_all(
            secondary_locales
                .iter()
                .map(|locale| self.fetch_locale(locale)),
        );

        let (primary, secondaries) = futures::join!(primary, secondaries);

        let page = blend_weighted(primary, secondaries, self.target);
        info!(
            "Built hybrid feed of {} articles ({} + {} locales) via {}",
            page.len(),
            primary_locale,
            secondary_locales.len(),
            self.provider.name()
        );
        page
    }

    async fn fetch_locale(&self, locale: &str) -> Vec<Article> {
        match self.provider.top_headlines(&HeadlineQuery::new(locale)).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!("Headlines for {} unavailable: {}", locale, e);
                Vec::new()
            }
        }
    }
}
