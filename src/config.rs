// src/config.rs
// =============================================================================
// Runtime configuration for a crawl.
//
// All values come from the command line (see cli.rs). Anything the user does
// not set falls back to CrawlConfig::default().
//
// The delay between requests is an explicit WaitPolicy instead of a random
// number picked once when the crawler is created. Tests use
// WaitPolicy::Fixed(Duration::ZERO) so they run instantly.
// =============================================================================

use anyhow::{bail, Result};
use rand::Rng;
use std::time::Duration;

/// Site the crawler talks to when no --base-url is given
pub const DEFAULT_BASE_URL: &str = "https://twitter.com";

/// Sent with every request
pub const DEFAULT_USER_AGENT: &str =
    concat!("related-search-crawler/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout used by the HTTP fetcher
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How long to pause after each fetch while expanding a level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaitPolicy {
    /// Always wait exactly this long
    Fixed(Duration),
    /// Wait a uniformly random time between min and max (inclusive)
    Uniform { min: Duration, max: Duration },
}

impl Default for WaitPolicy {
    // 0.25 to 0.75 seconds between requests
    fn default() -> Self {
        WaitPolicy::Uniform {
            min: Duration::from_millis(250),
            max: Duration::from_millis(750),
        }
    }
}

impl WaitPolicy {
    /// Picks the delay for the next pause.
    pub fn sample(&self) -> Duration {
        match *self {
            WaitPolicy::Fixed(delay) => delay,
            WaitPolicy::Uniform { min, max } => {
                if max <= min {
                    return min;
                }
                let secs = rand::rng().random_range(min.as_secs_f64()..=max.as_secs_f64());
                Duration::from_secs_f64(secs)
            }
        }
    }
}

/// Everything the crawl engine and the HTTP fetcher need to know.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Query paths are joined onto this URL
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub wait: WaitPolicy,
    /// Stop before a level that has no unvisited terms left to fetch.
    /// Off by default: the crawl runs through every configured level.
    pub stop_when_exhausted: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            wait: WaitPolicy::default(),
            stop_when_exhausted: false,
        }
    }
}

impl CrawlConfig {
    /// Checks the values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            bail!("base URL is empty");
        }
        if self.user_agent.trim().is_empty() {
            bail!("user agent is empty");
        }
        if self.timeout.is_zero() {
            bail!("timeout must be greater than zero");
        }
        if let WaitPolicy::Uniform { min, max } = self.wait {
            if min > max {
                bail!("wait range is inverted: {:?} > {:?}", min, max);
            }
        }
        Ok(())
    }
}
