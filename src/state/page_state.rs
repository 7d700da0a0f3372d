/// Crawl phase and per-visit outcome definitions
///
/// `PagePhase` follows the controller through its lifecycle; `VisitOutcome`
/// is what a single visit attempt reports back to the traversal loop.
use std::fmt;

/// Represents where the crawl controller currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PagePhase {
    /// No visit has been attempted yet
    #[default]
    NotStarted,

    /// A page is being fetched
    Fetching,

    // ===== Per-page results =====
    /// The last fetched page was parsed and its links recorded
    Parsed,

    /// The last fetch produced no bytes
    FetchFailed,

    // ===== Traversal =====
    /// Walking the frontier
    Recursing,

    /// Traversal finished
    Done,
}

impl PagePhase {
    /// Returns true if the controller may move from `self` to `next`
    pub fn can_transition_to(&self, next: PagePhase) -> bool {
        use PagePhase::*;

        match (self, next) {
            (NotStarted, Fetching | Done) => true,
            (Fetching, Parsed | FetchFailed) => true,
            (Parsed | FetchFailed, Recursing | Done) => true,
            // Skipped frontier entries leave the walk in Recursing
            (Recursing, Recursing | Fetching | Done) => true,
            // A finished crawl may be restarted from another URL with the same state
            (Done, Fetching | Done) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Fetching => "fetching",
            Self::Parsed => "parsed",
            Self::FetchFailed => "fetch_failed",
            Self::Recursing => "recursing",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for PagePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one visit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    /// The fetch budget was already spent; nothing happened
    BudgetExhausted,

    /// The URL was already indexed; nothing happened
    AlreadyVisited,

    /// The fetch produced no bytes; only the counter moved
    FetchFailed,

    /// The page was indexed and budget remains, so its frontier should be walked
    Indexed,

    /// The page was indexed and used the last unit of budget
    IndexedAtBudget,
}

impl VisitOutcome {
    /// Returns true if the traversal should walk the frontier after this visit
    pub fn expands(&self) -> bool {
        matches!(self, Self::Indexed)
    }

    /// Returns true if no further visit in this crawl can fetch anything
    pub fn ends_crawl(&self) -> bool {
        matches!(self, Self::BudgetExhausted | Self::IndexedAtBudget)
    }
}
