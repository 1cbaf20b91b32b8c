//! News ingestion clients for the alumni news core
//!
//! This crate provides:
//! - Publisher feeds: RSS/Atom feeds from a registry of local publishers,
//!   each with fallback endpoints
//! - Headline provider: the paid headline API, normalized into [`Article`]s
//! - Static fallback: sample articles served when neither can answer
//!
//! [`Article`]: alumni_core::Article

pub mod category;
pub mod config;
pub mod error;
pub mod fallback;
pub mod feed_client;
pub mod feed_registry;
pub mod headline_client;
mod html;
pub mod provider;
pub mod types;

pub use category::infer_category;
pub use config::{ConfigError, NewsConfig};
pub use error::NewsError;
pub use fallback::StaticFallbackProvider;
pub use feed_client::{parse_feed, FeedClient};
pub use feed_registry::{find_source, list_sources};
pub use headline_client::HeadlineClient;
pub use provider::{HeadlineProvider, HeadlineQuery};
