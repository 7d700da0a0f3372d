//! Output module: where crawled pages and crawl summaries go
//!
//! This module handles:
//! - Delivering parsed pages to a caller-supplied sink
//! - Summarizing a finished crawl

mod sink;
pub mod stats;

pub use sink::{ChannelSink, FnSink, PageRecord, PageSink};
pub use stats::{print_statistics, CrawlStatistics};
