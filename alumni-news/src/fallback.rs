//! Static sample articles served when no real provider can answer

use async_trait::async_trait;
use chrono::{Duration, Utc};

use alumni_core::{read_time_minutes, Article, ArticleSource, Category, DEFAULT_IMAGE_URL};

use crate::error::NewsError;
use crate::provider::{HeadlineProvider, HeadlineQuery};

/// Number of sample articles per category
pub const SAMPLE_SIZE: usize = 2;

/// Provider backed by a fixed table of sample articles.
///
/// Selected only when the headline provider is unconfigured or every real
/// attempt failed, so screens still have something to render.
#[derive(Debug, Clone, Default)]
pub struct StaticFallbackProvider;

impl StaticFallbackProvider {
    pub fn new() -> Self {
        Self
    }

    /// The fixed sample set for `category`, tagged with that category
    pub fn articles_for(&self, category: Category) -> Vec<Article> {
        let now = Utc::now();
        let breaking = category == Category::Breaking;

        sample_rows(category)
            .iter()
            .enumerate()
            .map(|(index, (title, description))| {
                let content = description.to_string();
                Article {
                    id: format!("sample_{}_{}", category.as_str(), index + 1),
                    title: title.to_string(),
                    description: description.to_string(),
                    read_time_minutes: read_time_minutes(&content),
                    content,
                    url: format!("https://news.alumni.example/{}/{}", category.as_str(), index + 1),
                    image_url: DEFAULT_IMAGE_URL.to_string(),
                    author: None,
                    published_at: now - Duration::hours(index as i64 + 1),
                    source: ArticleSource {
                        id: "alumni-news-desk".to_string(),
                        name: "Alumni News Desk".to_string(),
                        logo_url: None,
                        site_url: None,
                    },
                    category,
                    is_breaking: breaking,
                    is_trending: !breaking,
                    is_local: false,
                    view_count: 0,
                    like_count: 0,
                    comment_count: 0,
                }
            })
            .collect()
    }
}

#[async_trait]
impl HeadlineProvider for StaticFallbackProvider {
    fn name(&self) -> &str {
        "static-fallback"
    }

    async fn top_headlines(&self, query: &HeadlineQuery) -> Result<Vec<Article>, NewsError> {
        Ok(self.articles_for(query.category.unwrap_or(Category::General)))
    }

    async fn search(
        &self,
        _query: &str,
        category: Option<Category>,
    ) -> Result<Vec<Article>, NewsError> {
        Ok(self.articles_for(category.unwrap_or(Category::General)))
    }
}

fn sample_rows(category: Category) -> [(&'static str, &'static str); SAMPLE_SIZE] {
    match category {
        Category::Breaking => [
            (
                "Developing: Major announcement expected this afternoon",
                "Officials are set to brief the press on a developing story. Updates will follow as details emerge.",
            ),
            (
                "Live updates: Emergency services respond to city incident",
                "Emergency crews are on the scene. Residents are advised to follow official channels for guidance.",
            ),
        ],
        Category::World => [
            (
                "Global leaders gather for annual summit",
                "Heads of state meet to discuss trade, climate and security cooperation.",
            ),
            (
                "International aid reaches flood-affected regions",
                "Relief agencies report steady progress delivering supplies to displaced families.",
            ),
        ],
        Category::Ghana => [
            (
                "Accra hosts regional alumni leadership forum",
                "Graduates from across the country met in Accra to share mentorship and career initiatives.",
            ),
            (
                "New scholarship fund launched for tertiary students",
                "The fund will support students in engineering, health and the creative arts.",
            ),
        ],
        Category::Business => [
            (
                "Cedi steadies as inflation eases",
                "Analysts point to improved export earnings and tighter monetary policy.",
            ),
            (
                "Local startups attract record venture funding",
                "Investors are backing fintech and agritech firms at a faster pace this year.",
            ),
        ],
        Category::Technology => [
            (
                "Tech hubs expand coding programmes for graduates",
                "Training centres are adding cloud and data courses to meet employer demand.",
            ),
            (
                "Mobile money platforms roll out new security features",
                "Providers are introducing biometric checks to protect customer accounts.",
            ),
        ],
        Category::Sports => [
            (
                "Black Stars name squad for qualifiers",
                "The coach has called up several new faces ahead of the upcoming fixtures.",
            ),
            (
                "Inter-university games open this weekend",
                "Athletes from a dozen institutions will compete across fifteen disciplines.",
            ),
        ],
        Category::Health => [
            (
                "Hospitals expand free screening week",
                "Health workers will offer blood pressure and diabetes checks at community centres.",
            ),
            (
                "Health service urges vaccination ahead of rainy season",
                "Officials recommend updated immunisations for children and older adults.",
            ),
        ],
        Category::Science => [
            (
                "Researchers map new cocoa disease resistance genes",
                "The findings could help farmers protect yields against swollen shoot virus.",
            ),
            (
                "University observatory opens to the public",
                "Visitors can take part in guided night-sky sessions every Friday.",
            ),
        ],
        Category::Entertainment => [
            (
                "Music festival lineup announced",
                "Headliners include award-winning highlife and afrobeats artists.",
            ),
            (
                "Local film premieres to sold-out audience",
                "The drama follows three friends navigating life after university.",
            ),
        ],
        Category::Politics => [
            (
                "Parliament debates education funding bill",
                "Lawmakers are weighing proposals to increase support for public universities.",
            ),
            (
                "Electoral commission publishes voter register timeline",
                "Citizens will be able to verify their details online and at district offices.",
            ),
        ],
        Category::General => [
            (
                "Alumni association celebrates community service milestone",
                "Members have volunteered thousands of hours across mentoring and outreach projects.",
            ),
            (
                "Career fair connects graduates with employers",
                "More than fifty organisations took part, offering internships and full-time roles.",
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_two_tagged_samples() {
        let provider = StaticFallbackProvider::new();
        for category in Category::ALL {
            let articles = provider.articles_for(category);
            assert_eq!(articles.len(), SAMPLE_SIZE);
            assert!(articles.iter().all(|a| a.category == category));
            assert!(articles.iter().all(|a| !a.id.is_empty() && !a.title.is_empty()));
        }
    }

    #[test]
    fn test_breaking_samples_are_flagged() {
        let articles = StaticFallbackProvider::new().articles_for(Category::Breaking);
        assert!(articles.iter().all(|a| a.is_breaking && !a.is_trending));
    }

    #[tokio::test]
    async fn test_provider_contract_defaults_to_general() {
        let provider = StaticFallbackProvider::new();
        let articles = provider.top_headlines(&HeadlineQuery::new("gh")).await.unwrap();
        assert!(articles.iter().all(|a| a.category == Category::General));

        let searched = provider.search("cedi", Some(Category::Business)).await.unwrap();
        assert!(searched.iter().all(|a| a.category == Category::Business));
    }
}
