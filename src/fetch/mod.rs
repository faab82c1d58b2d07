// src/fetch/mod.rs
// =============================================================================
// This module downloads pages.
//
// The crawler never talks to reqwest directly. It talks to the `Fetcher`
// trait, so tests can swap in a stub that serves canned pages.
//
// Submodules:
// - http: the real implementation, backed by a shared reqwest Client
// =============================================================================

mod http;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::error::CrawlError;

pub use http::HttpFetcher;

/// What came back from a GET: the status code and the body text.
///
/// A 404 is still a response. Deciding whether a status is good enough is the
/// caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issues a GET for `url`. `timeout = None` means the client default.
    async fn fetch(
        &self,
        url: &str,
        headers: &HeaderMap,
        timeout: Option<Duration>,
    ) -> Result<FetchResponse, CrawlError>;
}
