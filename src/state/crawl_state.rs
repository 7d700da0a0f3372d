use crate::state::{Frontier, PagePhase, Visited};
use crate::url::Origin;

/// Mutable state for the lifetime of one crawl
///
/// Created empty when a crawler is built, mutated throughout the crawl and
/// dropped with the crawler. Nothing is persisted.
#[derive(Debug, Default)]
pub struct CrawlState {
    /// Number of fetches performed so far
    pub fetch_count: u32,

    /// Origin of the crawl, fixed on the first fetch
    pub origin: Option<Origin>,

    /// Discovered same-origin URLs
    pub frontier: Frontier,

    /// URLs considered indexed
    pub visited: Visited,

    /// Where the crawl currently is in its lifecycle
    pub phase: PagePhase,

    /// Pages handed to the sink
    pub pages_delivered: u32,

    /// Fetches that produced no bytes
    pub fetch_failures: u32,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once the fetch counter has reached `max_fetches`
    pub fn budget_exhausted(&self, max_fetches: u32) -> bool {
        self.fetch_count >= max_fetches
    }

    /// Records a page (and its canonical identity) as indexed
    pub fn mark_indexed(&mut self, url: &str, canonical: &str) {
        self.visited.insert(url);
        self.visited.insert(canonical);
    }

    /// Moves to `next`, logging transitions the state machine does not allow
    pub fn transition(&mut self, next: PagePhase) {
        if self.phase == next {
            return;
        }
        if !self.phase.can_transition_to(next) {
            tracing::error!("Invalid crawl phase transition: {} -> {}", self.phase, next);
        }
        self.phase = next;
    }
}
