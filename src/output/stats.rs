//! Statistics for a finished crawl
//!
//! This module provides the summary returned by a crawl and a plain-text
//! rendering of it.

use crate::state::CrawlState;
use chrono::{DateTime, Utc};

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Fetches performed (never above `max_fetches`)
    pub fetches: u32,

    /// Configured fetch budget
    pub max_fetches: u32,

    /// Pages handed to the sink
    pub pages_delivered: u32,

    /// Fetches that produced no bytes
    pub fetch_failures: u32,

    /// Number of URLs discovered in scope
    pub frontier_size: usize,

    /// Number of URLs considered indexed
    pub visited_size: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlStatistics {
    /// Builds statistics from the final crawl state
    pub fn from_state(
        state: &CrawlState,
        max_fetches: u32,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            fetches: state.fetch_count,
            max_fetches,
            pages_delivered: state.pages_delivered,
            fetch_failures: state.fetch_failures,
            frontier_size: state.frontier.len(),
            visited_size: state.visited.len(),
            started_at,
            finished_at,
        }
    }

    /// Elapsed wall-clock time in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }

    /// Share of fetches that produced a delivered page, in percent
    pub fn success_rate(&self) -> f64 {
        if self.fetches > 0 {
            (self.pages_delivered as f64 / self.fetches as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Fetches: {} of {}", stats.fetches, stats.max_fetches);
    println!("  Pages delivered: {}", stats.pages_delivered);
    println!("  URLs reachable for indexing: {}", stats.frontier_size);
    println!("  URLs indexed: {}", stats.visited_size);
    println!();

    if stats.fetch_failures > 0 {
        println!("Failed fetches: {}", stats.fetch_failures);
        println!();
    }

    println!(
        "Started: {}  Finished: {}  ({}s)",
        stats.started_at.to_rfc3339(),
        stats.finished_at.to_rfc3339(),
        stats.duration_seconds()
    );
    println!(
        "Success Rate: {:.1}% ({} / {} fetches delivered a page)",
        stats.success_rate(),
        stats.pages_delivered,
        stats.fetches
    );
}
