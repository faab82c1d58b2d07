// src/html/mod.rs
// =============================================================================
// This module turns fetched HTML into raw link strings.
//
// Two steps, two traits:
// - Parser: body text -> Document
// - Extractor: Document -> the href values inside it (still unresolved)
//
// Resolving those hrefs into absolute URLs is the crawler's job, not ours.
//
// Note: scraper's Html is not Send, so a Document must be dropped before the
// caller awaits anything. Keep parse + extract in one synchronous block.
// =============================================================================

mod extract;
mod parser;

use crate::error::CrawlError;

pub use extract::LinkExtractor;
pub use parser::{Document, HtmlParser};

pub trait Parser: Send + Sync {
    fn parse(&self, body: &str) -> Result<Document, CrawlError>;
}

pub trait Extractor: Send + Sync {
    fn extract_links(&self, document: &Document) -> Result<Vec<String>, CrawlError>;
}
