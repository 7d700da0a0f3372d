//! Frontier and visited-set bookkeeping
//!
//! The frontier is append-only and remembers insertion order so that the
//! crawl can walk it with plain indices while it keeps growing. Nothing is
//! ever removed from either set during a crawl.

use std::collections::HashSet;

/// Discovered same-origin URLs awaiting a visit decision
///
/// Entries may also be present in [`Visited`]; duplicates are filtered when
/// an entry is dequeued, not when it is inserted.
#[derive(Debug, Default, Clone)]
pub struct Frontier {
    order: Vec<String>,
    members: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a URL; returns false if it was already present
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.members.contains(&url) {
            return false;
        }
        self.members.insert(url.clone());
        self.order.push(url);
        true
    }

    /// The URL at `index` in insertion order
    pub fn get(&self, index: usize) -> Option<&str> {
        self.order.get(index).map(String::as_str)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.members.contains(url)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

/// URLs considered already indexed: raw fetch URLs and canonical identities
#[derive(Debug, Default, Clone)]
pub struct Visited {
    urls: HashSet<String>,
}

impl Visited {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a URL as indexed; returns false if it already was
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        self.urls.insert(url.into())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
