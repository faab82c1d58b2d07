// src/crawl/config.rs
// =============================================================================
// Everything a single crawl run can be tuned with.
//
// Built once (usually from the CLI), handed to the Crawler, never changed
// while the run is going. Two crawls in one process just use two configs.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::error::CrawlError;

pub const DEFAULT_USER_AGENT: &str = concat!("site-crawler/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_OUTPUT: &str = "output.txt";

/// When robots.txt is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RobotsMode {
    /// Never (the --impolite flag)
    Off,
    /// Once, for the seed URL, before the crawl starts
    #[default]
    SeedOnly,
    /// For every URL before it is fetched, using that URL's own origin
    PerLink,
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Links more than this many hops from the seed are never fetched
    pub max_depth: usize,
    /// Upper bound on pages being fetched/parsed at the same time
    pub concurrency: usize,
    pub user_agent: String,
    pub fetch_timeout: Duration,
    /// Pause each worker takes after finishing a page
    pub politeness_delay: Duration,
    pub robots: RobotsMode,
    pub output_path: PathBuf,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            concurrency: 1,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout: Duration::from_secs(10),
            politeness_delay: Duration::ZERO,
            robots: RobotsMode::default(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl CrawlConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_politeness_delay(mut self, delay: Duration) -> Self {
        self.politeness_delay = delay;
        self
    }

    pub fn with_robots(mut self, robots: RobotsMode) -> Self {
        self.robots = robots;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Number of workers to start. A concurrency of 0 still means one worker.
    pub fn workers(&self) -> usize {
        self.concurrency.max(1)
    }

    /// Headers sent with every page fetch.
    pub fn request_headers(&self) -> Result<HeaderMap, CrawlError> {
        let agent = HeaderValue::from_str(&self.user_agent).map_err(|_| {
            CrawlError::Configuration(format!("invalid user agent: {:?}", self.user_agent))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, agent);
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_cli_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.politeness_delay, Duration::ZERO);
        assert_eq!(config.robots, RobotsMode::SeedOnly);
        assert_eq!(config.output_path, PathBuf::from("output.txt"));
        assert!(config.user_agent.starts_with("site-crawler/"));
    }

    #[test]
    fn zero_concurrency_still_runs_one_worker() {
        assert_eq!(CrawlConfig::default().with_concurrency(0).workers(), 1);
        assert_eq!(CrawlConfig::default().with_concurrency(8).workers(), 8);
    }

    #[test]
    fn user_agent_becomes_a_header() {
        let headers = CrawlConfig::default()
            .with_user_agent("my-bot/2.0")
            .request_headers()
            .unwrap();
        assert_eq!(headers[USER_AGENT], "my-bot/2.0");
    }

    #[test]
    fn control_characters_in_user_agent_are_rejected() {
        let err = CrawlConfig::default()
            .with_user_agent("bad\nagent")
            .request_headers()
            .unwrap_err();
        assert!(matches!(err, CrawlError::Configuration(_)));
    }
}
