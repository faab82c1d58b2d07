// src/sink/memory.rs
// In-memory sink for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::OutputSink;
use crate::error::CrawlError;

#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutputSink for MemorySink {
    async fn append(&self, url: &str) -> Result<(), CrawlError> {
        self.lines.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
