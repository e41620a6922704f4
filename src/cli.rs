// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   related-search-crawler <SEED> [TOKENS]... [FLAGS]
//
// After the seed, free-form tokens can be given in any order:
//   3         crawl depth (if several numbers are given, the smallest wins)
//   output    write results_<seed>_depth<N>.csv
//   results   together with "output": write results_only_<seed>_depth<N>.csv
//   gephi     write gephi_<seed>_depth<N>.csv
//
// Example:
//   related-search-crawler "big cats" gephi 2 output results
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct
// - Option<T>: Flags the user may leave out
// =============================================================================

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::config::{CrawlConfig, WaitPolicy, DEFAULT_BASE_URL};
use crate::export::ExportKind;

#[derive(Parser, Debug)]
#[command(
    name = "related-search-crawler",
    version,
    about = "Crawls related searches breadth-first starting from a seed term",
    long_about = "related-search-crawler fetches the related searches of a seed term, then the \
                  related searches of every term it found, level by level, and exports the \
                  relationships as CSV or as an edge list for Gephi."
)]
pub struct Cli {
    /// Search term to start from (prefix with # for a hashtag)
    pub seed: String,

    /// Any of: a depth ("2"), "output", "results", "gephi"
    pub tokens: Vec<String>,

    /// Fixed delay in seconds between requests
    /// (default: random between 0.25 and 0.75)
    #[arg(long)]
    pub wait: Option<f64>,

    /// Stop early once a level has no new terms to fetch
    #[arg(long)]
    pub stop_when_exhausted: bool,

    /// Site to crawl
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Directory the CSV files are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Print the crawl report as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Log every request (same as RUST_LOG=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

/// What the free-form tokens asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub depth: u32,
    pub exports: Vec<ExportKind>,
}

impl Cli {
    /// Interprets the free-form tokens after the seed.
    pub fn run_options(&self) -> Result<RunOptions> {
        let mut depth: Option<u32> = None;
        let mut output = false;
        let mut results = false;
        let mut gephi = false;

        for token in &self.tokens {
            match token.as_str() {
                "output" => output = true,
                "results" => results = true,
                "gephi" => gephi = true,
                t if !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()) => {
                    let value: u32 = t.parse()?;
                    if value == 0 {
                        bail!("depth must be at least 1");
                    }
                    depth = Some(depth.map_or(value, |d| d.min(value)));
                }
                other => warn!(token = other, "ignoring unknown option"),
            }
        }

        let mut exports = Vec::new();
        if output {
            exports.push(if results {
                ExportKind::ResultsOnly
            } else {
                ExportKind::Full
            });
        }
        if gephi {
            exports.push(ExportKind::Gephi);
        }

        Ok(RunOptions {
            depth: depth.unwrap_or(1),
            exports,
        })
    }

    /// Builds the crawl configuration from the flags.
    pub fn crawl_config(&self) -> Result<CrawlConfig> {
        let wait = match self.wait {
            Some(secs) if secs.is_finite() && secs >= 0.0 => {
                WaitPolicy::Fixed(Duration::from_secs_f64(secs))
            }
            Some(secs) => bail!("invalid wait: {}", secs),
            None => WaitPolicy::default(),
        };

        let config = CrawlConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            wait,
            stop_when_exhausted: self.stop_when_exhausted,
            ..CrawlConfig::default()
        };
        config.validate()?;

        Ok(config)
    }
}
