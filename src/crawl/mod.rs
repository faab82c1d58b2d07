// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Worker pool pulling from a shared frontier (bounded concurrency)
// - Depth limit counted in link hops from the seed
// - Each URL crawled at most once, however many pages link to it
// - Optional robots.txt check for every discovered URL
// - Politeness delay between pages
// - Clean cancellation
//
// Submodules:
// - resolve: relative link -> absolute URL
// - visited: the claim-once URL set
// - frontier: the shared work queue
// - config: per-run settings
// - report: units, per-page results, run summary
// - orchestrator: the Crawler that ties it all together
// =============================================================================

mod config;
mod frontier;
mod orchestrator;
mod report;
mod resolve;
mod visited;

pub use config::{CrawlConfig, RobotsMode, DEFAULT_OUTPUT, DEFAULT_USER_AGENT};
pub use orchestrator::{validate_seed, Crawler};
pub use report::{CrawlOutcome, CrawlReport};
#[cfg(test)]
pub use report::{CrawlResult, CrawlUnit};
