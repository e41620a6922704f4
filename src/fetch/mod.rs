// src/fetch/mod.rs
// =============================================================================
// This module turns a query path into related searches.
//
// Submodules:
// - query: Builds the first query path from the seed term
// - html: Extracts (name, query path) pairs from a results page
// - http: Downloads the page with reqwest and hands it to html
//
// The crawl engine only knows about the Fetcher trait defined here, so tests
// can plug in a scripted fetcher instead of hitting the network.
//
// Rust concepts:
// - Traits: A shared interface that several types can implement
// - async-trait: Lets a trait have async methods
// =============================================================================

mod html;
mod http;
mod query;

use async_trait::async_trait;

use crate::error::FetchError;

pub use html::extract_related_searches;
pub use http::HttpFetcher;
pub use query::query_for_seed;

/// A results page never lists more than this many related searches,
/// and the result table has exactly this many slots per row.
pub const MAX_RELATED: usize = 5;

/// The related searches found for one query.
///
/// names[i] is what the site shows, queries[i] is the query path that
/// fetches the related searches of names[i].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedSearches {
    pub names: Vec<String>,
    pub queries: Vec<String>,
}

impl RelatedSearches {
    /// Number of usable (name, query) pairs
    pub fn len(&self) -> usize {
        self.names.len().min(self.queries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Anything that can look up the related searches of a query path.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the related searches for `query`, or why there are none.
    async fn related_searches(&self, query: &str) -> Result<RelatedSearches, FetchError>;
}
