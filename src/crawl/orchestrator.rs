// src/crawl/orchestrator.rs
// =============================================================================
// Drives a whole crawl, from the seed URL until there is nothing left to do.
//
// How it works:
// 1. Push the seed (depth 0) onto the frontier
// 2. Start `concurrency` workers; each one loops:
//      take a unit -> too deep? skip -> already claimed? skip
//      -> fetch -> parse -> extract -> resolve links -> push children
//      -> record the URL in the output sink -> optional politeness pause
// 3. When the frontier reports it is exhausted, every worker returns and the
//    per-worker results are merged into one CrawlReport
//
// The number of workers IS the concurrency limit: a worker handles one page
// at a time, so at most `concurrency` pages are in flight.
//
// Errors:
// - A page that fails (HTTP error, timeout, parse, extraction) is logged and
//   recorded in the report; the crawl goes on
// - A failed write to the output sink is logged; the crawl goes on
// - Only a broken frontier (or a panicked worker) ends the run with an error
//
// Cancellation: once the token fires, workers stop taking new units. A page
// that is already being fetched finishes (or fails) first. A robots.txt
// lookup still in progress is abandoned.
// =============================================================================

use std::sync::Arc;

use reqwest::header::HeaderMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use super::config::{CrawlConfig, RobotsMode};
use super::frontier::Frontier;
use super::report::{CrawlReport, CrawlResult, CrawlUnit};
use super::resolve::{is_crawlable, resolve};
use super::visited::VisitedSet;
use crate::error::CrawlError;
use crate::fetch::Fetcher;
use crate::html::{Extractor, HtmlParser, LinkExtractor, Parser};
use crate::robots::RobotsPolicy;
use crate::sink::OutputSink;

/// Checks that `seed` is an absolute http(s) URL and returns it trimmed.
pub fn validate_seed(seed: &str) -> Result<String, CrawlError> {
    let seed = seed.trim();
    if seed.is_empty() {
        return Err(CrawlError::Configuration("a start URL is required".to_string()));
    }
    if !is_crawlable(seed) {
        return Err(CrawlError::Configuration(format!(
            "start URL must be an absolute http(s) URL: {seed}"
        )));
    }
    Ok(seed.to_string())
}

pub struct Crawler {
    config: Arc<CrawlConfig>,
    fetcher: Arc<dyn Fetcher>,
    parser: Arc<dyn Parser>,
    extractor: Arc<dyn Extractor>,
    sink: Arc<dyn OutputSink>,
    // Shared by the seed check and the workers, so each origin's
    // robots.txt is fetched once per crawler
    robots: Arc<RobotsPolicy>,
}

impl Crawler {
    /// A crawler that parses HTML and follows `<a href>` links.
    pub fn new(config: CrawlConfig, fetcher: Arc<dyn Fetcher>, sink: Arc<dyn OutputSink>) -> Self {
        // Per-link lookups sit on the crawl path, so they get the page timeout.
        // The one-off seed check keeps the client default.
        let robots_timeout = match config.robots {
            RobotsMode::PerLink => Some(config.fetch_timeout),
            RobotsMode::Off | RobotsMode::SeedOnly => None,
        };
        let robots = RobotsPolicy::new(fetcher.clone()).with_timeout(robots_timeout);

        Self {
            config: Arc::new(config),
            fetcher,
            parser: Arc::new(HtmlParser),
            extractor: Arc::new(LinkExtractor::default()),
            sink,
            robots: Arc::new(robots),
        }
    }

    pub fn with_parser(mut self, parser: Arc<dyn Parser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Consults the seed's robots.txt. Always true when robots mode is Off.
    pub async fn check_robots(&self, seed: &str) -> bool {
        if self.config.robots == RobotsMode::Off {
            return true;
        }
        self.robots.is_allowed(seed).await
    }

    /// Crawls from `seed` until the frontier is exhausted or `cancel` fires.
    pub async fn run(
        &self,
        seed: &str,
        cancel: CancellationToken,
    ) -> Result<CrawlReport, CrawlError> {
        let seed = validate_seed(seed)?;
        // A bad User-Agent fails here, before any worker starts
        let headers = self.config.request_headers()?;

        let frontier = Arc::new(Frontier::new());
        frontier.push(CrawlUnit::seed(seed.clone()))?;

        // Only per-link mode checks robots.txt from inside the workers
        let robots = match self.config.robots {
            RobotsMode::PerLink => Some(self.robots.clone()),
            RobotsMode::Off | RobotsMode::SeedOnly => None,
        };

        // Workers stop on the caller's cancel, or when one of them hits a fatal error
        let stop = cancel.child_token();
        let visited = Arc::new(VisitedSet::new());

        let worker = Worker {
            config: self.config.clone(),
            fetcher: self.fetcher.clone(),
            parser: self.parser.clone(),
            extractor: self.extractor.clone(),
            sink: self.sink.clone(),
            frontier: frontier.clone(),
            visited: visited.clone(),
            robots,
            headers,
            stop: stop.clone(),
        };

        info!(
            seed = %seed,
            max_depth = self.config.max_depth,
            workers = self.config.workers(),
            "starting crawl"
        );

        // Spawn workers (each gets its own clone of the shared handles)
        let handles: Vec<_> = (0..self.config.workers())
            .map(|id| tokio::spawn(worker.clone().run(id)))
            .collect();

        let mut report = CrawlReport {
            seed,
            ..Default::default()
        };
        // First fatal error wins; the others are just echoes of the stop
        let mut fatal = None;

        // Merge what every worker saw
        for joined in futures::future::join_all(handles).await {
            match joined {
                Ok(Ok(log)) => {
                    report.results.extend(log.results);
                    report.skipped += log.skipped;
                    report.blocked += log.blocked;
                }
                Ok(Err(e)) => {
                    fatal.get_or_insert(e);
                }
                Err(e) => {
                    fatal.get_or_insert(CrawlError::Frontier(format!("crawl worker died: {e}")));
                }
            }
        }

        if let Some(e) = fatal {
            return Err(e);
        }

        report.cancelled = cancel.is_cancelled();
        info!(
            crawled = report.crawled(),
            failed = report.failures().count(),
            claimed = visited.len(),
            left_in_queue = frontier.queued(),
            cancelled = report.cancelled,
            "crawl finished"
        );
        Ok(report)
    }
}

// What one worker saw over its lifetime
#[derive(Debug, Default)]
struct WorkerLog {
    results: Vec<CrawlResult>,
    skipped: usize,
    blocked: usize,
}

// How a single unit ended
enum Step {
    Skipped,
    Blocked,
    Done(CrawlResult),
}

#[derive(Clone)]
struct Worker {
    config: Arc<CrawlConfig>,
    fetcher: Arc<dyn Fetcher>,
    parser: Arc<dyn Parser>,
    extractor: Arc<dyn Extractor>,
    sink: Arc<dyn OutputSink>,
    frontier: Arc<Frontier>,
    visited: Arc<VisitedSet>,
    robots: Option<Arc<RobotsPolicy>>,
    headers: HeaderMap,
    stop: CancellationToken,
}

impl Worker {
    async fn run(self, id: usize) -> Result<WorkerLog, CrawlError> {
        let mut log = WorkerLog::default();

        loop {
            // Stop wins over pending work
            let next = tokio::select! {
                biased;
                _ = self.stop.cancelled() => break,
                next = self.frontier.next() => next,
            };

            let lease = match next {
                Ok(Some(lease)) => lease,
                // Frontier exhausted: nothing queued, nothing in flight
                Ok(None) => break,
                Err(e) => {
                    // Take the other workers down with us
                    self.stop.cancel();
                    return Err(e);
                }
            };

            let step = match self.process(lease.unit()).await {
                Ok(step) => step,
                Err(e) => {
                    self.stop.cancel();
                    return Err(e);
                }
            };
            // Children are already queued; finishing the lease can't end the crawl early
            drop(lease);

            match step {
                Step::Skipped => log.skipped += 1,
                Step::Blocked => log.blocked += 1,
                Step::Done(result) => {
                    log.results.push(result);
                    // Only pages that hit the network earn a pause
                    self.pause().await;
                }
            }
        }

        debug!(worker = id, pages = log.results.len(), "worker done");
        Ok(log)
    }

    // Err only for fatal errors; page-level failures come back as Step::Done
    async fn process(&self, unit: &CrawlUnit) -> Result<Step, CrawlError> {
        if unit.depth > self.config.max_depth {
            trace!(url = %unit.url, depth = unit.depth, "beyond max depth");
            return Ok(Step::Skipped);
        }

        if !self.visited.try_claim(&unit.url) {
            trace!(url = %unit.url, "already claimed");
            return Ok(Step::Skipped);
        }

        if let Some(robots) = &self.robots {
            // A stalled robots.txt must not hold up shutdown
            let allowed = tokio::select! {
                _ = self.stop.cancelled() => {
                    debug!(url = %unit.url, "cancelled during robots.txt check");
                    return Ok(Step::Skipped);
                }
                allowed = robots.is_allowed(&unit.url) => allowed,
            };
            if !allowed {
                info!(url = %unit.url, "skipping, disallowed by robots.txt");
                return Ok(Step::Blocked);
            }
        }

        info!(url = %unit.url, depth = unit.depth, "crawling");

        let links = match self.crawl_page(unit).await {
            Ok(links) => links,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(url = %unit.url, depth = unit.depth, error = %e, "page failed");
                return Ok(Step::Done(CrawlResult::failure(unit, e)));
            }
        };

        self.enqueue_links(unit, &links)?;

        if let Err(e) = self.sink.append(&unit.url).await {
            warn!(url = %unit.url, error = %e, "could not record crawled URL");
        }

        Ok(Step::Done(CrawlResult::success(unit)))
    }

    async fn crawl_page(&self, unit: &CrawlUnit) -> Result<Vec<String>, CrawlError> {
        let response = self
            .fetcher
            .fetch(&unit.url, &self.headers, Some(self.config.fetch_timeout))
            .await?;

        if !response.is_success() {
            return Err(CrawlError::HttpStatus {
                url: unit.url.clone(),
                status: response.status,
            });
        }

        self.extract_links(&response.body)
    }

    // Kept synchronous: the parsed Document is not Send and must not live
    // across an await
    fn extract_links(&self, body: &str) -> Result<Vec<String>, CrawlError> {
        let document = self.parser.parse(body)?;
        self.extractor.extract_links(&document)
    }

    fn enqueue_links(&self, unit: &CrawlUnit, links: &[String]) -> Result<(), CrawlError> {
        let depth = unit.depth + 1;
        // Children would be skipped anyway; don't bother queueing them
        if depth > self.config.max_depth {
            trace!(url = %unit.url, links = links.len(), "depth limit reached, not following links");
            return Ok(());
        }

        let mut queued = 0;
        for link in links {
            // Relative to the page it was found on
            let absolute = resolve(link, &unit.url);
            // mailto:, javascript:, unparsable, ...
            if !is_crawlable(&absolute) {
                trace!(link = %link, page = %unit.url, "dropping dead link");
                continue;
            }
            // Dedup happens when the unit is taken, not here
            self.frontier.push(CrawlUnit::new(absolute, depth))?;
            queued += 1;
        }

        debug!(url = %unit.url, found = links.len(), queued, "links queued");
        Ok(())
    }

    async fn pause(&self) {
        let delay = self.config.politeness_delay;
        if delay.is_zero() {
            return;
        }
        tokio::select! {
            _ = self.stop.cancelled() => {}
            _ = tokio::time::sleep(delay) => {}
        }
    }
}
