// src/crawl/frontier.rs
// =============================================================================
// Keeps track of every term the crawl has already fetched (or tried to).
//
// One HashSet answers both questions the crawl asks:
// - was this term the origin of an earlier search?
// - was it already fetched earlier in the level we are expanding right now?
//
// A term goes into the set the moment it is picked for fetching, whether the
// fetch later succeeds or not. The set never shrinks.
// =============================================================================

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct FrontierTracker {
    visited: HashSet<String>,
}

impl FrontierTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time it sees `term` and false ever after.
    pub fn should_visit(&mut self, term: &str) -> bool {
        self.mark_visited(term)
    }

    /// Records `term` as visited. Returns false if it already was.
    pub fn mark_visited(&mut self, term: &str) -> bool {
        if self.visited.contains(term) {
            return false;
        }
        self.visited.insert(term.to_string())
    }

    pub fn contains(&self, term: &str) -> bool {
        self.visited.contains(term)
    }

    /// Number of distinct terms picked for fetching so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
