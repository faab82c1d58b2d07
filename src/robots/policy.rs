// src/robots/policy.rs
// =============================================================================
// Answers "may we crawl this URL?" by fetching the origin's robots.txt.
//
// Rules:
// - robots.txt lives at {scheme}://{host[:port]}/robots.txt
// - It is fetched with a plain GET: no custom User-Agent, and the client's
//   default timeout unless the policy was given one
// - Any failure (network error, 404, 500, ...) means "allowed": we learned
//   no rules, so there is nothing to obey
// - Each origin is fetched at most once per policy; the answer is cached
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use reqwest::header::HeaderMap;
use tracing::{debug, warn};
use url::Url;

use super::RobotsRules;
use crate::fetch::Fetcher;

pub struct RobotsPolicy {
    fetcher: Arc<dyn Fetcher>,
    timeout: Option<Duration>,
    // origin -> rules
    cache: DashMap<String, Arc<RobotsRules>>,
}

impl RobotsPolicy {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            timeout: None,
            cache: DashMap::new(),
        }
    }

    /// Bounds every robots.txt request. A request that times out counts
    /// as "no rules" like any other fetch failure.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// True unless the origin's robots.txt disallows the URL's path.
    pub async fn is_allowed(&self, url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(url, error = %e, "cannot derive robots.txt location, assuming allowed");
                return true;
            }
        };

        let rules = self.rules_for(&parsed).await;
        let allowed = rules.allows(parsed.path());
        if !allowed {
            debug!(url, "path disallowed by robots.txt");
        }
        allowed
    }

    async fn rules_for(&self, url: &Url) -> Arc<RobotsRules> {
        let origin = url.origin().ascii_serialization();
        let cached = self.cache.get(&origin).map(|entry| Arc::clone(entry.value()));
        if let Some(rules) = cached {
            return rules;
        }

        // Two workers may race to fetch the same origin; both get the same
        // answer, so the second insert is harmless
        let rules = Arc::new(self.fetch_rules(&origin).await);
        self.cache.insert(origin, rules.clone());
        rules
    }

    async fn fetch_rules(&self, origin: &str) -> RobotsRules {
        let robots_url = format!("{origin}/robots.txt");

        match self.fetcher.fetch(&robots_url, &HeaderMap::new(), self.timeout).await {
            Ok(response) if response.is_success() => {
                let rules = RobotsRules::parse(&response.body);
                debug!(
                    url = %robots_url,
                    disallowed = rules.disallowed_prefixes().len(),
                    "loaded robots.txt"
                );
                rules
            }
            Ok(response) => {
                debug!(url = %robots_url, status = response.status, "no usable robots.txt, allowing all");
                RobotsRules::allow_all()
            }
            Err(e) => {
                warn!(url = %robots_url, error = %e, "failed to fetch robots.txt, allowing all");
                RobotsRules::allow_all()
            }
        }
    }
}
