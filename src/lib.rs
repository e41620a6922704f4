// src/lib.rs
// =============================================================================
// Library side of the crawler. main.rs is a thin CLI on top of these modules.
//
// Modules:
// - cli: command-line parsing and the free-form option tokens
// - config: crawl settings (base URL, timeout, delay between requests)
// - crawl: the breadth-first crawl, its frontier and result table
// - error: fetch errors
// - export: CSV and Gephi writers
// - fetch: downloading and parsing related searches
// =============================================================================

pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod export;
pub mod fetch;
