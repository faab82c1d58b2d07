// src/crawl/frontier.rs
// =============================================================================
// The work queue shared by all crawl workers.
//
// How it works:
// 1. Units go in with `push` (the seed first, then every discovered link)
// 2. Workers take them out with `next`, which waits while the queue is empty
// 3. A worker holds a `Lease` while it processes a unit; dropping the lease
//    marks the unit finished
//
// The crawl is over when the queue is empty AND no lease is outstanding:
// nobody is left who could still discover a new link. At that moment every
// waiting worker is woken and `next` returns None.
//
// Invariant: a worker pushes the links it found BEFORE its lease drops, so
// the outstanding count can't touch zero while more work is on the way.
// =============================================================================

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use tokio::sync::Notify;

use super::report::CrawlUnit;
use crate::error::CrawlError;

#[derive(Debug, Default)]
pub struct Frontier {
    queue: Mutex<VecDeque<CrawlUnit>>,
    // Units queued plus units leased and not yet finished
    outstanding: AtomicUsize,
    notify: Notify,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, unit: CrawlUnit) -> Result<(), CrawlError> {
        let mut queue = self.lock()?;
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        queue.push_back(unit);
        drop(queue);

        self.notify.notify_one();
        Ok(())
    }

    /// Waits for the next unit. `None` means the crawl has run out of work.
    pub async fn next(&self) -> Result<Option<Lease<'_>>, CrawlError> {
        loop {
            // Register interest before looking, so a push or a final
            // completion between the check and the await still wakes us
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            let popped = self.lock()?.pop_front();
            if let Some(unit) = popped {
                return Ok(Some(Lease {
                    unit,
                    frontier: self,
                }));
            }

            if self.outstanding.load(Ordering::Acquire) == 0 {
                return Ok(None);
            }

            notified.await;
        }
    }

    /// Units waiting in the queue (not counting leased ones).
    pub fn queued(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or(0)
    }

    fn complete(&self) {
        if self.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.notify.notify_waiters();
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, VecDeque<CrawlUnit>>, CrawlError> {
        self.queue
            .lock()
            .map_err(|_| CrawlError::Frontier("queue lock poisoned".to_string()))
    }
}

/// A unit checked out of the frontier. Dropping it marks the unit finished,
/// even if the worker panicked while holding it.
#[derive(Debug)]
pub struct Lease<'a> {
    unit: CrawlUnit,
    frontier: &'a Frontier,
}

impl Lease<'_> {
    pub fn unit(&self) -> &CrawlUnit {
        &self.unit
    }
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        self.frontier.complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn empty_frontier_is_finished_immediately() {
        let frontier = Frontier::new();
        assert!(frontier.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn units_come_out_in_push_order() {
        let frontier = Frontier::new();
        frontier.push(CrawlUnit::seed("http://x.com/1")).unwrap();
        frontier.push(CrawlUnit::seed("http://x.com/2")).unwrap();
        assert_eq!(frontier.queued(), 2);

        let first = frontier.next().await.unwrap().unwrap();
        assert_eq!(first.unit().url, "http://x.com/1");
        drop(first);

        let second = frontier.next().await.unwrap().unwrap();
        assert_eq!(second.unit().url, "http://x.com/2");
        drop(second);

        assert!(frontier.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn waiter_stays_parked_while_a_lease_is_outstanding() {
        let frontier = Arc::new(Frontier::new());
        frontier.push(CrawlUnit::seed("http://x.com/")).unwrap();
        let lease = frontier.next().await.unwrap().unwrap();

        let waiter = {
            let frontier = frontier.clone();
            tokio::spawn(async move {
                frontier
                    .next()
                    .await
                    .unwrap()
                    .map(|lease| lease.unit().url.clone())
            })
        };

        // The leased unit may still discover links, so the waiter must not quit
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        frontier.push(CrawlUnit::new("http://x.com/child", 1)).unwrap();
        drop(lease);

        let got = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(got.as_deref(), Some("http://x.com/child"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn all_waiters_wake_when_the_last_lease_drops() {
        let frontier = Arc::new(Frontier::new());
        frontier.push(CrawlUnit::seed("http://x.com/")).unwrap();
        let lease = frontier.next().await.unwrap().unwrap();

        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let frontier = frontier.clone();
                tokio::spawn(async move { frontier.next().await.unwrap().is_none() })
            })
            .collect();

        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(lease);

        for waiter in waiters {
            let finished = tokio::time::timeout(Duration::from_secs(1), waiter)
                .await
                .unwrap()
                .unwrap();
            assert!(finished);
        }
    }
}
