// src/crawl/visited.rs
// =============================================================================
// The set of URLs this crawl has already claimed.
//
// The only way in is `try_claim`, which checks and inserts in one step.
// There is deliberately no `contains` + `insert` pair: two workers doing
// "is it there? no? then add it" at the same time would both crawl the page.
//
// DashSet shards its entries behind per-shard locks, so `insert` is a single
// critical section and returns whether the value was new.
// =============================================================================

use dashmap::DashSet;

use super::resolve::normalize;

#[derive(Debug, Default)]
pub struct VisitedSet {
    claimed: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url` for crawling. True exactly once per normalized URL.
    pub fn try_claim(&self, url: &str) -> bool {
        let key = normalize(url).unwrap_or_else(|| url.to_string());
        self.claimed.insert(key)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }
}
