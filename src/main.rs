// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap, start logging
// 2. Check the start URL (missing or invalid = usage error)
// 3. Ask robots.txt whether we may crawl it (unless --impolite)
// 4. Run the crawl, with Ctrl-C wired to a clean cancellation
// 5. Print the report and exit with the proper code:
//    0 = crawl finished (or was cancelled cleanly)
//    1 = bad/missing start URL, bad --link-selector, or robots.txt said no
//    2 = the crawl itself broke
//
// With --json, stdout carries the JSON report and nothing else; the banner
// and the closing status line go to stderr.
// =============================================================================

mod cli;
mod crawl;
mod error;
mod fetch;
mod html;
mod logging;
mod robots;
mod sink;

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

use cli::Cli;
use crawl::{validate_seed, CrawlOutcome, CrawlReport, Crawler, RobotsMode};
use error::CrawlError;
use fetch::HttpFetcher;
use html::LinkExtractor;
use sink::FileSink;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let Some(start_url) = cli.url.as_deref() else {
        Cli::command().print_help()?;
        eprintln!("\nError: a start URL is required (--url)");
        return Ok(1);
    };
    let start_url = match validate_seed(start_url) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(1);
        }
    };

    let extractor = match LinkExtractor::with_selector(&cli.link_selector) {
        Ok(extractor) => extractor,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(1);
        }
    };

    let config = cli.to_config();
    let sink = Arc::new(FileSink::new(&config.output_path));
    let output_path = sink.path().display().to_string();
    let crawler = Crawler::new(config, Arc::new(HttpFetcher::new()?), sink)
        .with_extractor(Arc::new(extractor));

    status(cli.json, &format!("🔍 Crawling website: {}", start_url));
    status(cli.json, &format!("📊 Max crawl depth: {}", crawler.config().max_depth));
    status(cli.json, &format!("💾 Saving URLs to: {}", output_path));

    if crawler.config().robots != RobotsMode::Off && !crawler.check_robots(&start_url).await {
        eprintln!("Crawling disallowed by robots.txt (use --impolite to ignore it)");
        return Ok(1);
    }

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, finishing pages already in flight");
                cancel.cancel();
            }
        })
    };

    let outcome = crawler.run(&start_url, cancel).await;
    interrupt.abort();

    match outcome {
        Ok(report) => {
            print!("{}", render_report(&report, cli.json)?);
            if report.cancelled {
                status(cli.json, "Crawl cancelled before completion.");
            } else {
                status(cli.json, "Crawling completed successfully.");
            }
            Ok(0)
        }
        Err(e @ CrawlError::Configuration(_)) => {
            eprintln!("Error: {e}");
            Ok(1)
        }
        Err(e) => {
            eprintln!("Error during crawling: {e}");
            Ok(2)
        }
    }
}

// Human-facing status lines: stdout normally, stderr when stdout is JSON
fn status(json: bool, line: &str) {
    if json {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

// Renders the report either as a table or JSON
fn render_report(report: &CrawlReport, json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(report)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(render_table(report)?)
    }
}

// Lists the failed pages, then a summary
fn render_table(report: &CrawlReport) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let failures: Vec<_> = report.failures().collect();

    // Only show the table if something failed
    if !failures.is_empty() {
        writeln!(out)?;
        writeln!(out, "{:<60} {:<6} {:<40}", "URL", "DEPTH", "ERROR")?;
        writeln!(out, "{}", "=".repeat(106))?;

        for result in &failures {
            let message = match &result.outcome {
                CrawlOutcome::Failure { error } => error.as_str(),
                CrawlOutcome::Success => "",
            };

            // Truncate URL if too long for display
            let url_display = if result.url.chars().count() > 57 {
                format!("{}...", result.url.chars().take(57).collect::<String>())
            } else {
                result.url.clone()
            };

            writeln!(out, "{:<60} {:<6} {:<40}", url_display, result.depth, message)?;
        }
    }

    // Summary
    writeln!(out)?;
    writeln!(out, "📊 Summary:")?;
    writeln!(out, "   ✅ Crawled: {}", report.crawled())?;
    writeln!(out, "   ❌ Failed: {}", failures.len())?;
    writeln!(out, "   ⏭️  Skipped: {}", report.skipped)?;
    // Only per-link robots mode blocks anything
    if report.blocked > 0 {
        writeln!(out, "   🚫 Blocked by robots.txt: {}", report.blocked)?;
    }
    Ok(out)
}
