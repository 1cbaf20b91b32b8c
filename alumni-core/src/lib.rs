//! Core types for the alumni news core
//!
//! This crate defines the shared data structures used across the news
//! pipeline: the canonical article model, categories, publisher feed
//! configuration and user preferences.

pub mod article;
pub mod category;
pub mod feed_source;
pub mod preferences;

pub use article::{read_time_minutes, Article, ArticleSource, DEFAULT_IMAGE_URL, WORDS_PER_MINUTE};
pub use category::Category;
pub use feed_source::FeedSource;
pub use preferences::UserPreferences;
