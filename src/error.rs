// src/error.rs
// =============================================================================
// Errors that can happen while fetching related searches for one query.
//
// Every variant here is the same kind of problem from the crawler's point of
// view: "we could not get related searches for this query path". The crawl
// engine never stops because of a FetchError. It writes the query path into
// its error list and moves on to the next term.
//
// Everything else (bad CLI input, unwritable CSV files) is handled with
// anyhow in main.rs and ends the program.
// =============================================================================

use thiserror::Error;

/// Why a related-search fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request itself failed (DNS, connection, timeout, TLS, ...)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a 2xx status
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// The query path could not be joined onto the base URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The page has no related-searches list, or the list has no links
    #[error("no related searches found on page")]
    MissingRelatedSearches,

    /// A CSS selector failed to parse
    #[error("invalid selector: {0}")]
    Selector(String),
}
