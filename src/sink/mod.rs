// src/sink/mod.rs
// =============================================================================
// Where crawled URLs end up.
//
// The contract is tiny: `append(url)` adds one line. Sinks never dedup;
// keeping each URL unique is the visited set's job, not ours.
//
// Submodules:
// - file: appends to a text file on disk (the default output)
// - memory: keeps lines in a Vec (tests only)
// =============================================================================

mod file;
#[cfg(test)]
pub(crate) mod memory;

use async_trait::async_trait;

use crate::error::CrawlError;

pub use file::FileSink;

#[async_trait]
pub trait OutputSink: Send + Sync {
    async fn append(&self, url: &str) -> Result<(), CrawlError>;
}
