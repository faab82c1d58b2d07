// src/error.rs
// =============================================================================
// Every way a crawl can go wrong, in one enum.
//
// Two families:
// - Per-unit errors (transport, HTTP status, parse, extraction, sink): the
//   orchestrator logs them and keeps crawling.
// - Fatal errors (configuration, frontier): the whole run stops.
//
// Dead links and a missing robots.txt are NOT errors. They never show up here.
// =============================================================================

use thiserror::Error;

/// Why a fetch failed before we got an HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Timeout,
    Connect,
    Dns,
    Tls,
    TooManyRedirects,
    Other,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransportKind::Timeout => "timeout",
            TransportKind::Connect => "connection failed",
            TransportKind::Dns => "dns error",
            TransportKind::Tls => "tls error",
            TransportKind::TooManyRedirects => "too many redirects",
            TransportKind::Other => "transport error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("{kind} fetching {url}: {message}")]
    Transport {
        url: String,
        kind: TransportKind,
        message: String,
    },

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to parse document: {0}")]
    Parse(String),

    #[error("failed to extract links: {0}")]
    Extraction(String),

    #[error("failed to write to output: {0}")]
    Sink(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("frontier failure: {0}")]
    Frontier(String),
}

impl CrawlError {
    /// Fatal errors abort the whole run; everything else stays with its unit.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CrawlError::Configuration(_) | CrawlError::Frontier(_))
    }
}
