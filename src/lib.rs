//! Sitewalk: a bounded, same-origin site walker
//!
//! This crate fetches pages starting from a single URL, resolves each page's
//! canonical identity, follows same-host links depth-first until a global
//! fetch budget is spent, and hands every parsed page to a caller-supplied sink.

pub mod config;
pub mod crawler;
pub mod output;
pub mod scrape;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for crawl operations
///
/// Only configuration-fatal conditions end up here. Page-level failures
/// (network errors, empty responses) are contained inside the crawl.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Discovered link '{href}' could not be parsed: {message}")]
    InvalidLink { href: String, message: String },
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, WalkError>;

// Re-export commonly used types
pub use crate::config::{Config, InvalidLinkPolicy};
pub use crate::crawler::{crawl, Crawler};
pub use crate::output::{CrawlStatistics, PageRecord, PageSink};
pub use crate::scrape::Scraper;
pub use crate::state::{CrawlState, PagePhase, VisitOutcome};
pub use crate::url::Origin;
