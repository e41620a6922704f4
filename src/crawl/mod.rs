// src/crawl/mod.rs
// =============================================================================
// This module handles the related-search crawl.
//
// Features:
// - Breadth-first expansion starting from a seed term
// - Every term is fetched at most once per crawl
// - Configurable depth limit
// - Polite crawling with delays between requests
//
// Submodules:
// - table: The append-only result table (Result and Query rows)
// - frontier: The set of terms already fetched
// - engine: The level-by-level crawl itself
// =============================================================================

mod engine;
mod frontier;
mod table;

pub use engine::{CrawlEngine, CrawlReport, CrawlState};
pub use frontier::FrontierTracker;
pub use table::{RecordType, ResultTable, SearchRecord};
