//! Keyword-based category inference for articles that arrive untagged

use alumni_core::Category;

/// Ordered keyword table. The first rule with a matching word wins, so the
/// order here decides ties such as a headline mentioning both AI and football.
///
/// Keywords are stems: "research" also matches "researchers". A leading `*`
/// matches the end of a word instead, so "*tech" catches "fintech".
const RULES: &[(Category, &[&str])] = &[
    (Category::Sports, &["sport", "football", "soccer"]),
    (Category::Technology, &["tech", "*tech", "ai", "software"]),
    (Category::Business, &["business", "economy", "economic", "market"]),
    (Category::Health, &["health", "medical", "covid"]),
    (Category::Science, &["science", "scientist", "research", "study", "studies"]),
    (Category::Entertainment, &["entertainment", "movie", "music"]),
];

/// Stems shorter than this must match a word exactly ("ai" is not "aid")
const MIN_STEM_LEN: usize = 4;

/// Infer a category from an article's title and description.
///
/// Text is split into lower-cased words and each word is checked against the
/// rule stems. Falls back to [`Category::World`].
pub fn infer_category(title: &str, description: &str) -> Category {
    let text = format!("{} {}", title, description).to_lowercase();
    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    RULES
        .iter()
        .find(|(_, keywords)| {
            words
                .iter()
                .any(|w| keywords.iter().any(|kw| word_matches(w, kw)))
        })
        .map(|(category, _)| *category)
        .unwrap_or(Category::World)
}

fn word_matches(word: &str, keyword: &str) -> bool {
    match keyword.strip_prefix('*') {
        Some(suffix) => word.ends_with(suffix),
        None if keyword.len() < MIN_STEM_LEN => word == keyword,
        None => word.starts_with(keyword),
    }
}
