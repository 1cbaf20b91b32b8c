//! News Service
//!
//! The facade screens talk to. Each request is described by a [`NewsFilter`],
//! routed to the right producer (headline provider, publisher feeds, or the
//! blended "for you" page) and served through the [`NewsCache`].

use std::sync::Arc;

use tracing::{debug, info, instrument};

use alumni_core::{Article, Category, FeedSource, UserPreferences};
use alumni_news::{
    find_source, list_sources, FeedClient, HeadlineClient, HeadlineProvider, HeadlineQuery,
    NewsConfig, NewsError, StaticFallbackProvider,
};

use crate::blend::{dedupe_articles, sort_by_recency, HybridFeedBuilder};
use crate::news_cache::{filter_signature, CacheOrigin, NewsCache};
use crate::store::{KeyValueStore, SqliteStore, StoreError};

/// Which page a screen is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsView {
    /// Blended multi-locale headlines plus local publishers
    #[default]
    ForYou,
    Category(Category),
}

impl NewsView {
    /// Label used in cache keys and records
    pub fn label(&self) -> &'static str {
        match self {
            Self::ForYou => "for_you",
            Self::Category(category) => category.as_str(),
        }
    }

    fn category(&self) -> Option<Category> {
        match self {
            Self::ForYou => None,
            Self::Category(category) => Some(*category),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Latest,
    Oldest,
    Popular,
}

/// A screen's article request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsFilter {
    pub view: NewsView,
    pub search: Option<String>,
    /// Publisher ids; non-empty restricts the page to those feeds
    pub sources: Vec<String>,
    pub sort: SortOrder,
    /// Applied after the cache so muting never invalidates entries
    pub muted_sources: Vec<String>,
}

impl NewsFilter {
    pub fn for_you() -> Self {
        Self::default()
    }

    pub fn category(category: Category) -> Self {
        Self {
            view: NewsView::Category(category),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = Some(search).filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_preferences(mut self, preferences: &UserPreferences) -> Self {
        self.muted_sources = preferences.muted_sources.clone();
        self
    }

    pub fn signature(&self) -> String {
        filter_signature(
            self.view.label(),
            self.search.as_deref().unwrap_or_default(),
            &self.sources,
        )
    }
}

/// Producer chosen for a filter
#[derive(Debug)]
enum Route<'a> {
    Search(&'a str, Option<Category>),
    Publishers(Vec<FeedSource>),
    Hybrid,
    Headlines(Category),
}

/// Cached news access for every screen
pub struct NewsService {
    headlines: Arc<dyn HeadlineProvider>,
    feeds: FeedClient,
    sources: Vec<FeedSource>,
    fallback: StaticFallbackProvider,
    cache: NewsCache,
    primary_locale: String,
    secondary_locales: Vec<String>,
    page_size: usize,
}

impl NewsService {
    /// Create a service from configuration, persisting through `store`
    pub fn new(config: &NewsConfig, store: Arc<dyn KeyValueStore>) -> Self {
        info!(
            "Initializing NewsService (headline provider: {}, locales: {} + {:?})",
            if config.has_api_key() { "enabled" } else { "sample data" },
            config.primary_locale,
            config.secondary_locales
        );

        Self::from_parts(
            Arc::new(HeadlineClient::from_config(config)),
            FeedClient::with_timeout(config.feed_timeout),
            list_sources(),
            NewsCache::new(store),
            config,
        )
    }

    /// Create a service whose cache lives in the SQLite file from `config`
    pub fn open(config: &NewsConfig) -> Result<Self, StoreError> {
        let store = SqliteStore::open(&config.cache_db_path)?;
        Ok(Self::new(config, Arc::new(store)))
    }

    /// Assemble a service from explicit collaborators
    pub fn from_parts(
        headlines: Arc<dyn HeadlineProvider>,
        feeds: FeedClient,
        sources: Vec<FeedSource>,
        cache: NewsCache,
        config: &NewsConfig,
    ) -> Self {
        Self {
            headlines,
            feeds,
            sources,
            fallback: StaticFallbackProvider::new(),
            cache,
            primary_locale: config.primary_locale.clone(),
            secondary_locales: config.secondary_locales.clone(),
            page_size: config.page_size,
        }
    }

    /// Articles for `filter`, served from cache when fresh
    #[instrument(skip(self, filter), fields(view = filter.view.label()))]
    pub async fn articles(&self, filter: &NewsFilter) -> Vec<Article> {
        let signature = filter.signature();
        let route = self.route(filter);
        let serves_samples = !matches!(route, Route::Publishers(_));

        let lookup = self
            .cache
            .lookup(&signature, filter.view.label(), || self.produce(route))
            .await;

        let mut articles = match lookup.origin {
            CacheOrigin::Miss if serves_samples => {
                let category = filter.view.category().unwrap_or(Category::General);
                info!("Serving sample articles for {}", category);
                self.fallback.articles_for(category)
            }
            _ => lookup.articles,
        };

        if !filter.muted_sources.is_empty() {
            articles.retain(|a| !filter.muted_sources.contains(&a.source.id));
        }
        sort_articles(&mut articles, filter.sort);

        debug!("{} articles for {} ({:?})", articles.len(), signature, lookup.origin);
        articles
    }

    pub async fn fetch_by_category(&self, category: Category) -> Vec<Article> {
        self.articles(&NewsFilter::category(category)).await
    }

    pub async fn search(&self, query: &str, category: Option<Category>) -> Vec<Article> {
        let filter = match category {
            Some(category) => NewsFilter::category(category),
            None => NewsFilter::for_you(),
        };
        self.articles(&filter.with_search(query)).await
    }

    pub async fn for_you(&self) -> Vec<Article> {
        self.articles(&NewsFilter::for_you()).await
    }

    /// Local publisher articles; an empty list means every registered publisher
    pub async fn local_news(&self, source_ids: &[String]) -> Vec<Article> {
        let filter = NewsFilter::category(Category::Ghana).with_sources(source_ids.to_vec());
        self.articles(&filter).await
    }

    pub fn clear_cache(&self) {
        self.cache.clear_cache();
    }

    fn route<'a>(&self, filter: &'a NewsFilter) -> Route<'a> {
        if let Some(query) = filter.search.as_deref() {
            return Route::Search(query, filter.view.category());
        }

        if !filter.sources.is_empty() {
            let selected = filter
                .sources
                .iter()
                .filter_map(|id| {
                    self.sources
                        .iter()
                        .find(|s| &s.id == id)
                        .cloned()
                        .or_else(|| find_source(id))
                })
                .collect();
            return Route::Publishers(selected);
        }

        match filter.view {
            NewsView::ForYou => Route::Hybrid,
            NewsView::Category(Category::Ghana) => Route::Publishers(self.sources.clone()),
            NewsView::Category(category) => Route::Headlines(category),
        }
    }

    async fn produce(&self, route: Route<'_>) -> Result<Vec<Article>, NewsError> {
        let articles = match route {
            Route::Search(query, category) => self.headlines.search(query, category).await?,
            Route::Publishers(sources) => {
                self.feeds
                    .fetch_all_publishers(&sources, self.page_size)
                    .await
            }
            Route::Headlines(category) => {
                let query = HeadlineQuery::new(&self.primary_locale).with_category(Some(category));
                self.headlines.top_headlines(&query).await?
            }
            Route::Hybrid => {
                let builder = HybridFeedBuilder::new(Arc::clone(&self.headlines));
                let (hybrid, local) = futures::join!(
                    builder.build(&self.primary_locale, &self.secondary_locales),
                    self.feeds.fetch_all_publishers(&self.sources, self.page_size)
                );

                let mut combined = dedupe_articles(hybrid.into_iter().chain(local).collect());
                sort_by_recency(&mut combined);
                combined
            }
        };

        if articles.is_empty() {
            return Err(NewsError::Unavailable("no articles gathered".to_string()));
        }
        Ok(articles)
    }
}

fn sort_articles(articles: &mut [Article], order: SortOrder) {
    match order {
        SortOrder::Latest => sort_by_recency(articles),
        SortOrder::Oldest => articles.sort_by(|a, b| a.published_at.cmp(&b.published_at)),
        SortOrder::Popular => articles.sort_by(|a, b| b.view_count.cmp(&a.view_count)),
    }
}
