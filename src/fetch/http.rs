// src/fetch/http.rs
// =============================================================================
// The real Fetcher: plain GET requests through reqwest.
//
// Key functionality:
// - One Client for the whole run (connection pooling)
// - Per-request headers and timeout, so the robots check can use defaults
//   while page fetches carry the configured User-Agent
// - Sorts transport failures into kinds (timeout, DNS, TLS, ...) so the
//   log line says what actually went wrong
// =============================================================================

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use tracing::trace;

use super::{FetchResponse, Fetcher};
use crate::error::{CrawlError, TransportKind};

// How many redirects we follow before giving up on a page
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, CrawlError> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| CrawlError::Configuration(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        headers: &HeaderMap,
        timeout: Option<Duration>,
    ) -> Result<FetchResponse, CrawlError> {
        let mut request = self.client.get(url).headers(headers.clone());
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;
        let status = response.status().as_u16();
        trace!(url, status, "response received");

        // The body read is covered by the same request timeout
        let body = response
            .text()
            .await
            .map_err(|e| categorize_error(url, e))?;

        Ok(FetchResponse { status, body })
    }
}

// Turns a reqwest error into a TransportError with a kind we can report.
//
// reqwest's top-level message is often just "error sending request", so the
// whole source chain is folded into the message before we look for hints.
fn categorize_error(url: &str, error: reqwest::Error) -> CrawlError {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    let lowered = message.to_lowercase();

    let kind = if error.is_timeout() {
        TransportKind::Timeout
    } else if error.is_redirect() {
        TransportKind::TooManyRedirects
    } else if lowered.contains("dns") || lowered.contains("failed to lookup") {
        TransportKind::Dns
    } else if lowered.contains("certificate") || lowered.contains("tls") || lowered.contains("ssl") {
        TransportKind::Tls
    } else if error.is_connect() {
        TransportKind::Connect
    } else {
        TransportKind::Other
    };

    CrawlError::Transport {
        url: url.to_string(),
        kind,
        message,
    }
}
