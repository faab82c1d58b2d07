// src/html/extract.rs
// =============================================================================
// Pulls raw href values out of a parsed Document.
//
// We return links exactly as written in the page ("/docs", "../about",
// "https://other.com", even "mailto:..."). Filtering and resolving happen
// later, in the crawler, where the page URL is known.
//
// The CSS selector is parsed once, up front: a bad --link-selector is a
// configuration mistake and should stop the run before any page is fetched.
// =============================================================================

use scraper::Selector;

use super::{Document, Extractor};
use crate::error::CrawlError;

// Every anchor that actually points somewhere
const DEFAULT_SELECTOR: &str = "a[href]";

#[derive(Debug, Clone)]
pub struct LinkExtractor {
    selector: Selector,
}

impl LinkExtractor {
    /// Extracts the `href` of every element matching `selector`.
    pub fn with_selector(selector: &str) -> Result<Self, CrawlError> {
        let parsed = Selector::parse(selector).map_err(|e| {
            CrawlError::Configuration(format!("invalid link selector '{selector}': {e}"))
        })?;
        Ok(Self { selector: parsed })
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        // A constant we wrote ourselves, so parsing cannot fail
        let selector = Selector::parse(DEFAULT_SELECTOR).expect("default link selector is valid");
        Self { selector }
    }
}

impl Extractor for LinkExtractor {
    fn extract_links(&self, document: &Document) -> Result<Vec<String>, CrawlError> {
        let links = document
            .html()
            .select(&self.selector)
            .filter_map(|element| element.value().attr("href"))
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty())
            .collect();

        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::{HtmlParser, Parser};

    fn links_of(html: &str) -> Vec<String> {
        let doc = HtmlParser.parse(html).unwrap();
        LinkExtractor::default().extract_links(&doc).unwrap()
    }

    #[test]
    fn keeps_hrefs_as_written() {
        let links = links_of(
            r#"
            <a href="https://rust-lang.org">Rust</a>
            <a href="/docs">Docs</a>
            <a href="../about">About</a>
            <a href="mailto:me@example.com">Mail</a>
        "#,
        );
        assert_eq!(
            links,
            vec!["https://rust-lang.org", "/docs", "../about", "mailto:me@example.com"]
        );
    }

    #[test]
    fn skips_anchors_without_href_and_blank_hrefs() {
        let links = links_of(r#"<a name="top">Top</a><a href="  ">blank</a><a href="/x">x</a>"#);
        assert_eq!(links, vec!["/x"]);
    }

    #[test]
    fn custom_selector_reaches_other_tags() {
        let doc = HtmlParser
            .parse(r#"<link rel="next" href="/page/2"><a href="/a">a</a>"#)
            .unwrap();
        let links = LinkExtractor::with_selector("link[rel=next]")
            .unwrap()
            .extract_links(&doc)
            .unwrap();
        assert_eq!(links, vec!["/page/2"]);
    }

    #[test]
    fn invalid_selector_is_rejected_up_front() {
        for bad in ["a[[", "", "<<"] {
            let err = LinkExtractor::with_selector(bad).unwrap_err();
            assert!(matches!(err, CrawlError::Configuration(_)), "{bad:?} accepted");
        }
    }

    #[test]
    fn one_extractor_serves_many_pages() {
        let extractor = LinkExtractor::with_selector("a.nav[href]").unwrap();
        for (i, page) in ["/one", "/two", "/three"].iter().enumerate() {
            let html = format!(r#"<a class="nav" href="{page}">n</a><a href="/skip{i}">s</a>"#);
            let doc = HtmlParser.parse(&html).unwrap();
            assert_eq!(extractor.extract_links(&doc).unwrap(), vec![page.to_string()]);
        }
    }
}
