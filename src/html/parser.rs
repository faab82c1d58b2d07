// src/html/parser.rs
// =============================================================================
// Parses HTML with the `scraper` crate (html5ever underneath).
//
// html5ever is a browser-grade parser: it never rejects markup, it repairs it.
// Even an empty body is a valid (empty) document with no links in it.
// =============================================================================

use scraper::Html;

use super::Parser;
use crate::error::CrawlError;

/// A parsed page.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn html(&self) -> &Html {
        &self.html
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl Parser for HtmlParser {
    fn parse(&self, body: &str) -> Result<Document, CrawlError> {
        Ok(Document {
            html: Html::parse_document(body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_broken_markup_anyway() {
        let doc = HtmlParser.parse("<p>unclosed <a href='/x'>link").unwrap();
        let text: String = doc.html().root_element().text().collect();
        assert!(text.contains("unclosed"));
    }

    #[test]
    fn empty_body_is_an_empty_document() {
        let doc = HtmlParser.parse("").unwrap();
        let text: String = doc.html().root_element().text().collect();
        assert!(text.trim().is_empty());

        assert!(HtmlParser.parse("  \n\t ").is_ok());
    }
}
