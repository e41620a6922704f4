// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, written to stderr)
// 3. Run the related-search crawl from the seed term
// 4. Print a summary (or JSON), list failed queries, write the CSV exports
// 5. Exit with proper code (0 = success, 1 = some queries failed, 2 = error)
// =============================================================================

use anyhow::Result;
use clap::Parser;
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

use related_search_crawler::cli::Cli;
use related_search_crawler::crawl::{CrawlEngine, CrawlReport, RecordType};
use related_search_crawler::export::export_table;
use related_search_crawler::fetch::HttpFetcher;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so `--json` output on stdout stays machine-readable.
// RUST_LOG wins over --verbose when both are set.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

// Returns:
//   Ok(0) = crawl finished, every query loaded
//   Ok(1) = crawl finished, some queries failed to load
//   Err   = bad arguments or the exports could not be written
async fn run(cli: Cli) -> Result<i32> {
    let options = cli.run_options()?;
    let config = cli.crawl_config()?;

    println!("🔍 Crawling related searches for: {}", cli.seed);
    println!("📊 Depth: {}", options.depth);

    let fetcher = HttpFetcher::new(&config)?;
    let engine = CrawlEngine::new(fetcher.clone(), cli.seed.as_str(), config);
    let report = engine.run(options.depth).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    if !report.errors.is_empty() {
        println!("\n⚠️  There were loading errors:");
        for query in &report.errors {
            match fetcher.url_for(query) {
                Ok(url) => println!("   error while loading {}", url),
                Err(_) => println!("   error while loading {}", query),
            }
        }
    }

    for kind in options.exports {
        let path = export_table(
            kind,
            &report.table,
            &report.seed,
            report.final_level,
            &cli.out_dir,
        )?;
        println!("💾 Saved {}", path.display());
    }

    println!("✅ All done");

    if report.errors.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

// Prints one line per search: level, term and what it led to
fn print_summary(report: &CrawlReport) {
    println!();
    println!("{:<6} {:<30} {:<60}", "LEVEL", "SEARCH", "RELATED");
    println!("{}", "=".repeat(96));

    for row in report.table.select(RecordType::Result, |_| true) {
        let related: Vec<&str> = row.related_values().collect();
        println!("{:<6} {:<30} {:<60}", row.level, row.search, related.join(", "));
    }

    let mut per_level: BTreeMap<u32, usize> = BTreeMap::new();
    for row in report.table.select(RecordType::Result, |_| true) {
        *per_level.entry(row.level).or_default() += 1;
    }

    println!();
    println!("📊 Summary:");
    for (level, searches) in &per_level {
        println!("   Level {}: {} search(es)", level, searches);
    }
    println!("   🔎 Terms visited: {}", report.visited);
    println!("   🌐 Requests: {}", report.fetches);
    println!("   ❌ Failed: {}", report.errors.len());
    println!("   📋 Final level: {}", report.final_level);
}
