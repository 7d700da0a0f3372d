//! Crawler module for page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching that never fails outward
//! - HTML parsing, canonical resolution and link extraction
//! - The budgeted, depth-first traversal over the frontier

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, Fetcher};
pub use parser::{collect_links, extract_anchor_hrefs, extract_canonical_href, parse_document};

use crate::config::{validate, Config};
use crate::output::{CrawlStatistics, PageSink};
use crate::Result;

/// Runs a complete crawl
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration
/// 2. Build the HTTP client
/// 3. Fetch pages from the start URL until the budget or the frontier runs out
/// 4. Hand every parsed page to `sink`
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Crawl completed
/// * `Err(WalkError)` - Configuration was invalid or a configuration-fatal URL was hit
///
/// # Example
///
/// ```no_run
/// use sitewalk::{crawl, Config, PageRecord};
///
/// # async fn example() -> Result<(), sitewalk::WalkError> {
/// let mut pages: Vec<PageRecord> = Vec::new();
/// let stats = crawl(Config::new("https://example.com/", 10), &mut pages).await?;
/// println!("{} fetches, {} pages", stats.fetches, pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl<S: PageSink>(config: Config, sink: S) -> Result<CrawlStatistics> {
    validate(&config)?;

    let mut crawler = Crawler::new(config, sink)?;
    crawler.begin().await
}
