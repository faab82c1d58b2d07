// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every flag has a default except --url. Each one can also come from an
// environment variable (CRAWLER_URL, CRAWLER_DEPTH, ...), which is handy in
// containers and CI.
//
// The parsed flags are turned into a CrawlConfig in one place
// (`Cli::to_config`) so the crawler itself never sees clap types.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::crawl::{CrawlConfig, RobotsMode, DEFAULT_OUTPUT, DEFAULT_USER_AGENT};

#[derive(Parser, Debug)]
#[command(
    name = "site-crawler",
    version,
    about = "Crawl a website from a start URL and record every page visited",
    long_about = "site-crawler follows links from a start URL up to a maximum depth, \
                  visiting each page once, honouring robots.txt, and appending every \
                  successfully crawled URL to an output file."
)]
pub struct Cli {
    /// The start URL for the crawler (required)
    #[arg(long, env = "CRAWLER_URL")]
    pub url: Option<String>,

    /// Maximum crawl depth, in link hops from the start URL
    ///
    /// Depth 0 = just the start page
    /// Depth 1 = start page + every page it links to
    #[arg(long, env = "CRAWLER_DEPTH", default_value_t = 1)]
    pub depth: usize,

    /// Number of pages fetched at the same time
    #[arg(long, env = "CRAWLER_CONCURRENCY", default_value_t = 1)]
    pub concurrency: usize,

    /// The User-Agent header sent with every page request
    #[arg(long, env = "CRAWLER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout, in seconds
    #[arg(long = "timeout", env = "CRAWLER_TIMEOUT", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Pause after each page, in milliseconds (per worker)
    #[arg(long, env = "CRAWLER_DELAY_MS", default_value_t = 0)]
    pub delay_ms: u64,

    /// File the crawled URLs are appended to
    #[arg(long, env = "CRAWLER_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// CSS selector for the elements whose href is followed
    #[arg(long, default_value = "a[href]")]
    pub link_selector: String,

    /// Ignore robots.txt entirely
    #[arg(long)]
    pub impolite: bool,

    /// Check robots.txt for every discovered URL, not just the start URL
    #[arg(long, conflicts_with = "impolite")]
    pub robots_per_link: bool,

    /// Print the crawl report as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Debug-level logging for the crawler (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn robots_mode(&self) -> RobotsMode {
        if self.impolite {
            RobotsMode::Off
        } else if self.robots_per_link {
            RobotsMode::PerLink
        } else {
            RobotsMode::SeedOnly
        }
    }

    pub fn to_config(&self) -> CrawlConfig {
        CrawlConfig::default()
            .with_max_depth(self.depth)
            .with_concurrency(self.concurrency)
            .with_user_agent(self.user_agent.clone())
            .with_fetch_timeout(Duration::from_secs(self.timeout_secs))
            .with_politeness_delay(Duration::from_millis(self.delay_ms))
            .with_robots(self.robots_mode())
            .with_output_path(self.output.clone())
    }
}
