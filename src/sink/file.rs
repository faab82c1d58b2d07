// src/sink/file.rs
// =============================================================================
// Appends crawled URLs to a text file, one per line.
//
// - The file is created if missing and never truncated: a second run adds
//   to what the first one wrote
// - Each append opens, writes and flushes under one lock, so lines from
//   concurrent workers never interleave and every line is on disk as soon as
//   `append` returns
// =============================================================================

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::OutputSink;
use crate::error::CrawlError;

#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl OutputSink for FileSink {
    async fn append(&self, url: &str) -> Result<(), CrawlError> {
        let _guard = self.write_lock.lock().await;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        let mut line = String::with_capacity(url.len() + 1);
        line.push_str(url);
        line.push('\n');
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn creates_the_file_and_writes_one_line_per_url() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("out.txt"));

        sink.append("http://x.com/").await.unwrap();
        sink.append("http://x.com/about").await.unwrap();

        let written = std::fs::read_to_string(sink.path()).unwrap();
        assert_eq!(written, "http://x.com/\nhttp://x.com/about\n");
    }

    #[tokio::test]
    async fn same_url_twice_gives_two_lines() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("out.txt"));

        sink.append("http://x.com/a").await.unwrap();
        sink.append("http://x.com/a").await.unwrap();

        let written = std::fs::read_to_string(sink.path()).unwrap();
        assert_eq!(written.lines().collect::<Vec<_>>(), ["http://x.com/a", "http://x.com/a"]);
    }

    #[tokio::test]
    async fn existing_content_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "http://earlier.run/\n").unwrap();

        FileSink::new(&path).append("http://x.com/").await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "http://earlier.run/\nhttp://x.com/\n");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_appends_never_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(FileSink::new(dir.path().join("out.txt")));

        let writers = (0..50).map(|i| {
            let sink = sink.clone();
            tokio::spawn(async move { sink.append(&format!("http://x.com/page/{i}")).await })
        });
        for result in futures::future::join_all(writers).await {
            result.unwrap().unwrap();
        }

        let written = std::fs::read_to_string(sink.path()).unwrap();
        let mut lines: Vec<_> = written.lines().collect();
        lines.sort_unstable();
        let mut expected: Vec<_> = (0..50).map(|i| format!("http://x.com/page/{i}")).collect();
        expected.sort_unstable();
        assert_eq!(lines, expected);
    }

    #[tokio::test]
    async fn unwritable_target_is_a_sink_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory can't be opened for appending
        let sink = FileSink::new(dir.path());

        let err = sink.append("http://x.com/").await.unwrap_err();
        assert!(matches!(err, CrawlError::Sink(_)));
        assert!(!err.is_fatal());
    }
}
