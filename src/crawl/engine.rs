// src/crawl/engine.rs
// =============================================================================
// The crawl engine: breadth-first expansion of related searches.
//
// How it works:
// 1. Fetch the related searches of the seed term (level 1)
// 2. Take every related term found at the current level
// 3. Fetch each one that was never fetched before, one at a time, pausing
//    between requests (these rows become the next level)
// 4. Repeat steps 2-3 until the configured depth is used up
//
// States:
//   NotStarted --expand_seed--> Expanding(1) --expand_level--> Expanding(2)
//   ... --(depth used up)--> Done
//
// Failed fetches never stop the crawl. The query path goes into the error
// list, nothing is added to the table, and the next term is fetched.
// =============================================================================

use serde::Serialize;
use tracing::{info, warn};

use super::frontier::FrontierTracker;
use super::table::{RecordType, ResultTable};
use crate::config::CrawlConfig;
use crate::fetch::{query_for_seed, Fetcher};

/// Where the engine is in its crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    NotStarted,
    Expanding(u32),
    Done,
}

/// Everything a finished crawl produced.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub seed: String,
    /// Level the crawl ended at; used in the export file names
    pub final_level: u32,
    /// Number of times the fetcher was called
    pub fetches: usize,
    /// Number of distinct terms the crawl picked for fetching
    pub visited: usize,
    /// Query paths whose fetch failed, in the order they failed
    pub errors: Vec<String>,
    pub table: ResultTable,
}

/// Drives one crawl from a seed term.
pub struct CrawlEngine<F> {
    fetcher: F,
    config: CrawlConfig,
    seed: String,
    seed_query: String,
    table: ResultTable,
    frontier: FrontierTracker,
    errors: Vec<String>,
    fetches: usize,
    level: u32,
    depth_to_go: u32,
    state: CrawlState,
}

impl<F: Fetcher> CrawlEngine<F> {
    /// Creates an engine for `seed`. The seed's query path is derived from
    /// the term (see fetch::query_for_seed).
    pub fn new(fetcher: F, seed: impl Into<String>, config: CrawlConfig) -> Self {
        let seed = seed.into();
        let seed_query = query_for_seed(&seed);

        Self {
            fetcher,
            config,
            seed,
            seed_query,
            table: ResultTable::new(),
            frontier: FrontierTracker::new(),
            errors: Vec::new(),
            fetches: 0,
            level: 1,
            depth_to_go: 0,
            state: CrawlState::NotStarted,
        }
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn table(&self) -> &ResultTable {
        &self.table
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn seed_query(&self) -> &str {
        &self.seed_query
    }

    /// Fetches the related searches of one term at the current level.
    ///
    /// On success the Result/Query row pair is appended to the table. On
    /// failure, or when the fetch found nothing, `query` is added to the
    /// error list instead.
    pub async fn fetch_one(&mut self, term: &str, query: &str) {
        self.frontier.mark_visited(term);
        self.fetches += 1;

        info!(level = self.level, search = term, query, "fetching related searches");

        match self.fetcher.related_searches(query).await {
            Ok(related) => {
                let added = self.table.append_batch(
                    self.level,
                    term,
                    query,
                    &related.names,
                    &related.queries,
                );

                if added {
                    info!(
                        level = self.level,
                        search = term,
                        results = ?related.names,
                        "search yielded related searches"
                    );
                } else {
                    warn!(level = self.level, search = term, query, "search yielded nothing");
                    self.errors.push(query.to_string());
                }
            }
            Err(e) => {
                warn!(level = self.level, search = term, query, error = %e, "search yielded an error");
                self.errors.push(query.to_string());
            }
        }
    }

    /// Fetches the seed term at level 1.
    pub async fn expand_seed(&mut self) {
        self.level = 1;
        self.state = CrawlState::Expanding(self.level);

        let seed = self.seed.clone();
        let seed_query = self.seed_query.clone();
        self.fetch_one(&seed, &seed_query).await;
    }

    /// Fetches every not-yet-visited term found at the current level, which
    /// produces the rows of the next level.
    pub async fn expand_level(&mut self) {
        let candidates = self.frontier_candidates();

        self.level += 1;
        self.depth_to_go = self.depth_to_go.saturating_sub(1);
        self.state = CrawlState::Expanding(self.level);

        info!(level = self.level, candidates = candidates.len(), "going deeper");

        for (term, query) in candidates {
            if !self.frontier.should_visit(&term) {
                continue;
            }

            self.fetch_one(&term, &query).await;
            tokio::time::sleep(self.config.wait.sample()).await;
        }

        info!(level = self.level, rows = self.table.len(), "finished level");
    }

    /// Runs the whole crawl down to `depth` levels and returns what it found.
    ///
    /// A depth of 0 behaves like 1: the seed is always fetched.
    pub async fn run(mut self, depth: u32) -> CrawlReport {
        self.depth_to_go = depth;

        self.expand_seed().await;
        self.depth_to_go = self.depth_to_go.saturating_sub(1);

        while self.depth_to_go > 0 {
            if self.config.stop_when_exhausted && !self.has_unvisited_candidates() {
                info!(level = self.level, "no new terms left, stopping early");
                break;
            }
            self.expand_level().await;
        }

        self.state = CrawlState::Done;

        if !self.errors.is_empty() {
            warn!(count = self.errors.len(), "there were loading errors");
        }

        CrawlReport {
            seed: self.seed,
            final_level: self.level,
            fetches: self.fetches,
            visited: self.frontier.visited_count(),
            errors: self.errors,
            table: self.table,
        }
    }

    // (term, query path) pairs found at the current level, in table order.
    // The Result and Query rows of one fetch sit next to each other, so the
    // n-th Result row pairs with the n-th Query row.
    fn frontier_candidates(&self) -> Vec<(String, String)> {
        let level = self.level;
        let results = self.table.select(RecordType::Result, |l| l == level);
        let queries = self.table.select(RecordType::Query, |l| l == level);

        results
            .iter()
            .zip(&queries)
            .flat_map(|(result, query)| result.related.iter().zip(&query.related))
            .filter_map(|(name, query)| match (name, query) {
                (Some(name), Some(query)) => Some((name.clone(), query.clone())),
                _ => None,
            })
            .collect()
    }

    fn has_unvisited_candidates(&self) -> bool {
        self.frontier_candidates()
            .iter()
            .any(|(term, _)| !self.frontier.contains(term))
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why does run() take self by value?
//    - Once the crawl is over the engine has nothing left to do
//    - Moving the table and the error list into the CrawlReport avoids
//      cloning them
//
// 2. Why collect the candidates before fetching?
//    - fetch_one() appends to the table while we loop
//    - Holding references into the table during the loop would borrow it
//      immutably and mutably at the same time, which Rust does not allow
//
// 3. Why is the frontier checked again inside the loop?
//    - The same term can show up under several origins at one level
//    - The first occurrence is fetched, every later one is skipped
// -----------------------------------------------------------------------------
