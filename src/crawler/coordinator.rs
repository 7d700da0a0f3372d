//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the traversal that ties everything together:
//! - Enforcing the global fetch budget and the inter-request delay
//! - Fixing the origin on the first fetch
//! - Fetching, parsing and handing pages to the sink
//! - Recording visited URLs and growing the frontier
//! - Walking the frontier depth-first
//!
//! # Traversal order
//!
//! After a page is indexed with budget to spare, the *whole* current
//! frontier is walked from its first entry, including entries appended by
//! pages visited along the way. Each such walk is a frame on an explicit
//! stack; a page indexed inside a frame pushes a new frame on top. The fetch
//! budget caps the total number of fetches, not the link distance from the
//! start page.

use crate::config::Config;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{collect_links, extract_canonical_href, parse_document};
use crate::output::{CrawlStatistics, PageRecord, PageSink};
use crate::state::{CrawlState, PagePhase, VisitOutcome};
use crate::url::{resolve_canonical, Origin};
use crate::{UrlError, WalkError};
use chrono::Utc;
use scraper::Html;

/// Main crawler structure
///
/// Owns the state of exactly one crawl, so independent crawlers never share
/// frontier or visited sets.
pub struct Crawler<S: PageSink> {
    config: Config,
    fetcher: Fetcher,
    state: CrawlState,
    sink: S,
}

impl<S: PageSink> Crawler<S> {
    /// Creates a crawler with an HTTP client built from `config.http`
    ///
    /// The configuration is taken as-is; see [`crate::config::validate`].
    pub fn new(config: Config, sink: S) -> Result<Self, WalkError> {
        let fetcher = Fetcher::new(&config.http)?;
        Ok(Self::with_fetcher(config, fetcher, sink))
    }

    /// Creates a crawler around an existing fetcher
    pub fn with_fetcher(config: Config, fetcher: Fetcher, sink: S) -> Self {
        Self {
            config,
            fetcher,
            state: CrawlState::new(),
            sink,
        }
    }

    /// Crawls from the configured start URL
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlStatistics)` - The crawl ran until the budget or the frontier ran out
    /// * `Err(WalkError)` - The start URL or a discovered link could not be parsed
    pub async fn begin(&mut self) -> Result<CrawlStatistics, WalkError> {
        let started_at = Utc::now();
        let start_url = self.config.crawl.start_url.clone();

        self.start(&start_url).await?;

        Ok(CrawlStatistics::from_state(
            &self.state,
            self.config.crawl.max_fetches,
            started_at,
            Utc::now(),
        ))
    }

    /// Visits `url` and, if it was indexed with budget to spare, walks the frontier
    ///
    /// May be called again after a crawl finished; state is shared across calls.
    pub async fn start(&mut self, url: &str) -> Result<(), WalkError> {
        if self.visit(url).await?.expands() {
            self.walk_frontier().await?;
        }

        self.state.transition(PagePhase::Done);
        Ok(())
    }

    /// Returns true if `url` has been indexed, either as a fetch URL or as a
    /// canonical identity
    pub fn was_indexed(&self, url: &str) -> bool {
        self.state.visited.contains(url)
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn origin(&self) -> Option<&Origin> {
        self.state.origin.as_ref()
    }

    pub fn fetch_count(&self) -> u32 {
        self.state.fetch_count
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the crawler, returning its sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    async fn walk_frontier(&mut self) -> Result<(), WalkError> {
        // Each entry is a position in the frontier for one pending walk
        let mut cursors: Vec<usize> = vec![0];

        while let Some(cursor) = cursors.last_mut() {
            let Some(next) = self.state.frontier.get(*cursor).map(str::to_owned) else {
                cursors.pop();
                continue;
            };
            *cursor += 1;

            self.state.transition(PagePhase::Recursing);
            let outcome = self.visit(&next).await?;

            if outcome.ends_crawl() {
                break;
            }
            if outcome.expands() {
                cursors.push(0);
            }
        }

        Ok(())
    }

    /// One visit attempt: guards, fetch, parse, index
    async fn visit(&mut self, url: &str) -> Result<VisitOutcome, WalkError> {
        let max_fetches = self.config.crawl.max_fetches;

        if self.state.budget_exhausted(max_fetches) {
            return Ok(VisitOutcome::BudgetExhausted);
        }

        if self.state.visited.contains(url) {
            tracing::trace!("Already indexed: {}", url);
            return Ok(VisitOutcome::AlreadyVisited);
        }

        if self.state.origin.is_none() {
            let origin = Origin::parse(url)?;
            tracing::debug!("Crawl origin: {}", origin);
            self.state.origin = Some(origin);
        }

        self.state.fetch_count += 1;
        self.state.transition(PagePhase::Fetching);
        tracing::info!(
            "({} of {}) Fetching for: {}",
            self.state.fetch_count,
            max_fetches,
            url
        );

        let delay = self.config.request_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let body = self.fetcher.fetch(url).await;
        if body.is_empty() {
            tracing::warn!("Nothing fetched for {}", url);
            self.state.fetch_failures += 1;
            self.state.transition(PagePhase::FetchFailed);
            return Ok(VisitOutcome::FetchFailed);
        }

        let document = parse_document(&body);
        self.index_page(url, document)
    }

    /// Hands the page to the sink and records its identity and links
    ///
    /// The document is moved into the sink; nothing here keeps a reference
    /// to it afterwards.
    fn index_page(&mut self, url: &str, document: Html) -> Result<VisitOutcome, WalkError> {
        self.state.transition(PagePhase::Parsed);

        let origin = self
            .state
            .origin
            .as_ref()
            .ok_or(UrlError::MissingDomain)?;
        let canonical = resolve_canonical(extract_canonical_href(&document), url, origin);
        let links = collect_links(
            &document,
            origin,
            self.config.crawl.ignore_query_params,
            self.config.crawl.on_invalid_link,
        );

        self.sink.page_loaded(PageRecord::new(url, document));
        self.state.pages_delivered += 1;

        self.state.mark_indexed(url, &canonical);
        if canonical != url {
            tracing::debug!("{} declares canonical {}", url, canonical);
        }

        for link in links? {
            self.state.frontier.insert(link);
        }

        if self.state.budget_exhausted(self.config.crawl.max_fetches) {
            tracing::info!(
                "Number of urls reachable for indexing: {}",
                self.state.frontier.len()
            );
            Ok(VisitOutcome::IndexedAtBudget)
        } else {
            Ok(VisitOutcome::Indexed)
        }
    }
}
