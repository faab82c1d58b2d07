// src/crawl/report.rs
// =============================================================================
// The values that flow between crawl stages, and the summary of a run.
//
// - CrawlUnit: "fetch this URL, it sits N links away from the seed"
// - CrawlResult: how one unit ended (success, or failure with a reason)
// - CrawlReport: everything a run produced, printable as a table or JSON
// =============================================================================

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlUnit {
    pub url: String,
    pub depth: usize,
}

impl CrawlUnit {
    pub fn new(url: impl Into<String>, depth: usize) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }

    pub fn seed(url: impl Into<String>) -> Self {
        Self::new(url, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CrawlOutcome {
    Success,
    Failure { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct CrawlResult {
    pub url: String,
    pub depth: usize,
    #[serde(flatten)]
    pub outcome: CrawlOutcome,
}

impl CrawlResult {
    pub fn success(unit: &CrawlUnit) -> Self {
        Self {
            url: unit.url.clone(),
            depth: unit.depth,
            outcome: CrawlOutcome::Success,
        }
    }

    pub fn failure(unit: &CrawlUnit, error: impl ToString) -> Self {
        Self {
            url: unit.url.clone(),
            depth: unit.depth,
            outcome: CrawlOutcome::Failure {
                error: error.to_string(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, CrawlOutcome::Success)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    pub seed: String,
    /// One entry per unit that got as far as a fetch, in completion order
    pub results: Vec<CrawlResult>,
    /// Units dropped because they were too deep or already claimed
    pub skipped: usize,
    /// Units refused by robots.txt (per-link robots mode only)
    pub blocked: usize,
    pub cancelled: bool,
}

impl CrawlReport {
    pub fn crawled(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CrawlResult> {
        self.results.iter().filter(|r| !r.is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_serializes_with_flat_status() {
        let unit = CrawlUnit::new("http://x.com/a", 1);
        let json = serde_json::to_value(CrawlResult::failure(&unit, "HTTP 404")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "url": "http://x.com/a",
                "depth": 1,
                "status": "failure",
                "error": "HTTP 404"
            })
        );

        let json = serde_json::to_value(CrawlResult::success(&unit)).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn report_counts_successes_and_failures() {
        let ok = CrawlUnit::seed("http://x.com");
        let bad = CrawlUnit::new("http://x.com/missing", 1);
        let report = CrawlReport {
            seed: ok.url.clone(),
            results: vec![CrawlResult::success(&ok), CrawlResult::failure(&bad, "HTTP 404")],
            ..Default::default()
        };
        assert_eq!(report.crawled(), 1);
        assert_eq!(report.failures().count(), 1);
    }
}
