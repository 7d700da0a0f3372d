//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: the fetch counter, origin, frontier and visited set of one crawl
//! - `Frontier` / `Visited`: the two URL sets the traversal is driven by
//! - `PagePhase`: where the controller is in its lifecycle
//! - `VisitOutcome`: what a single visit attempt produced

mod crawl_state;
mod frontier;
mod page_state;

// Re-export main types
pub use crawl_state::CrawlState;
pub use frontier::{Frontier, Visited};
pub use page_state::{PagePhase, VisitOutcome};
