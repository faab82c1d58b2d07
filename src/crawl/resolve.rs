// src/crawl/resolve.rs
// =============================================================================
// Turns the links we find on a page into absolute URLs.
//
// Examples (base = "http://x.com/a/b"):
//   "c"                -> "http://x.com/a/c"
//   "/b"               -> "http://x.com/b"
//   "../up"            -> "http://x.com/up"
//   "//y.com/p"        -> "http://y.com/p"
//   "#section"         -> "http://x.com/a/b"   (fragments never matter here)
//   "http://Y.com:80/" -> "http://y.com/"      (normalized)
//
// Everything here is a pure function. No state, no locks, no errors: input
// we cannot make sense of comes back unchanged, and `is_crawlable` tells the
// caller to drop it.
// =============================================================================

use url::Url;

/// Resolves `link` against `base` (RFC 3986 reference resolution).
///
/// Absolute links are normalized: lower-case scheme and host, default port
/// removed, fragment dropped. Anything unparsable is returned as given.
pub fn resolve(link: &str, base: &str) -> String {
    let link = link.trim();

    // Already absolute? Then the base is irrelevant
    if let Ok(absolute) = Url::parse(link) {
        return without_fragment(absolute);
    }

    match Url::parse(base).and_then(|base| base.join(link)) {
        Ok(joined) => without_fragment(joined),
        Err(_) => link.to_string(),
    }
}

/// The canonical form used as a dedup key, or `None` if `url` is not absolute.
pub fn normalize(url: &str) -> Option<String> {
    Url::parse(url.trim()).ok().map(without_fragment)
}

/// True for absolute http(s) URLs with a host, the only things worth fetching.
///
/// mailto:, javascript:, tel:, data: and unparsable leftovers are dead links.
pub fn is_crawlable(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}

fn without_fragment(mut url: Url) -> String {
    url.set_fragment(None);
    url.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_replaces_base_path() {
        assert_eq!(resolve("/b", "http://x.com/a/"), "http://x.com/b");
    }

    #[test]
    fn relative_path_merges_with_base_directory() {
        assert_eq!(resolve("c", "http://x.com/a/b"), "http://x.com/a/c");
    }

    #[test]
    fn absolute_link_passes_through() {
        assert_eq!(resolve("http://y.com/z", "http://x.com/a"), "http://y.com/z");
    }

    #[test]
    fn dot_segments_collapse() {
        assert_eq!(resolve("../d/./e", "http://x.com/a/b/c"), "http://x.com/a/d/e");
    }

    #[test]
    fn query_replaces_base_query() {
        assert_eq!(resolve("?page=2", "http://x.com/list?page=1"), "http://x.com/list?page=2");
    }

    #[test]
    fn scheme_relative_link_keeps_base_scheme() {
        assert_eq!(resolve("//cdn.y.com/lib", "https://x.com/"), "https://cdn.y.com/lib");
    }

    #[test]
    fn fragment_only_link_points_at_the_page_itself() {
        assert_eq!(resolve("#top", "http://x.com/a?q=1"), "http://x.com/a?q=1");
    }

    #[test]
    fn absolute_links_are_normalized() {
        assert_eq!(resolve("HTTP://Y.COM:80/Path#frag", "http://x.com/"), "http://y.com/Path");
    }

    #[test]
    fn malformed_input_comes_back_unchanged() {
        assert_eq!(resolve("http://[::1", "http://x.com/"), "http://[::1");
        assert_eq!(resolve("page", "not a url"), "page");
    }

    #[test]
    fn normalize_adds_root_path_and_drops_fragment() {
        assert_eq!(normalize("http://Example.com").as_deref(), Some("http://example.com/"));
        assert_eq!(normalize("http://example.com/#x").as_deref(), Some("http://example.com/"));
        assert_eq!(normalize("/relative"), None);
    }

    #[test]
    fn only_http_urls_are_crawlable() {
        assert!(is_crawlable("http://x.com/a"));
        assert!(is_crawlable("https://x.com"));
        assert!(!is_crawlable("mailto:me@x.com"));
        assert!(!is_crawlable("javascript:void(0)"));
        assert!(!is_crawlable("http://[::1"));
        assert!(!is_crawlable(""));
    }
}
