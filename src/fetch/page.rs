//! Parsed destination pages.

use rustc_hash::{FxHashMap, FxHashSet};
use url::Url;

use super::FetchError;
use crate::core::RegionSpec;
use crate::dom::{Fragment, Selector, parse_html};

/// A fetched and parsed page, owned by the run that retrieved it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: Url,
    /// Trimmed text of the first `<title>`, empty when absent.
    pub title: String,
    /// Children of the first element matching each region selector.
    pub regions: FxHashMap<String, Fragment>,
    /// Raw `src` values of `<script>` elements, document order, deduplicated.
    pub script_sources: Vec<String>,
}

impl FetchedPage {
    /// Parse a response body.
    pub fn parse(url: Url, body: &[u8], regions: &[RegionSpec]) -> Result<Self, FetchError> {
        let parse_error = |reason: String| FetchError::Parse {
            url: url.clone(),
            reason,
        };

        let markup = std::str::from_utf8(body).map_err(|err| parse_error(err.to_string()))?;
        let document = parse_html(markup).map_err(|err| parse_error(err.to_string()))?;
        if !document.has_elements() {
            return Err(parse_error("document contains no elements".into()));
        }

        let title = document
            .find(&Selector::tag("title"))
            .map(|title| title.text_content().trim().to_string())
            .unwrap_or_default();

        let regions = regions
            .iter()
            .filter_map(|spec| {
                document
                    .find(&spec.selector)
                    .map(|element| (spec.name.clone(), element.to_fragment()))
            })
            .collect();

        let mut seen = FxHashSet::default();
        let script_sources = document
            .find_all(&Selector::tag("script"))
            .into_iter()
            .filter_map(|script| script.attr("src"))
            .map(str::trim)
            .filter(|src| !src.is_empty() && seen.insert(*src))
            .map(str::to_string)
            .collect();

        Ok(Self {
            url,
            title,
            regions,
            script_sources,
        })
    }

    #[inline]
    pub fn region(&self, name: &str) -> Option<&Fragment> {
        self.regions.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> Vec<RegionSpec> {
        vec![
            RegionSpec::new("main", Selector::parse("main").unwrap(), true),
            RegionSpec::new("footer", Selector::parse("footer").unwrap(), false),
        ]
    }

    fn url() -> Url {
        Url::parse("https://example.com/about").unwrap()
    }

    #[test]
    fn test_parse_full_page() {
        let html = r#"<!DOCTYPE html>
<html>
<head><title>  About &amp; Us </title><script src="/a.js"></script></head>
<body>
<header><nav><a href="/">Home</a></nav></header>
<main><h1>About</h1><p>Hi</p></main>
<script src="/b.js" defer></script>
<script src="/a.js"></script>
<script>inline()</script>
</body>
</html>"#;
        let page = FetchedPage::parse(url(), html.as_bytes(), &specs()).unwrap();

        assert_eq!(page.title, "About & Us");
        assert_eq!(page.script_sources, ["/a.js", "/b.js"]);
        assert_eq!(
            page.region("main").unwrap().inner_html(),
            "<h1>About</h1><p>Hi</p>"
        );
        // Missing regions are absent, not errors
        assert!(page.region("footer").is_none());
    }

    #[test]
    fn test_parse_without_title() {
        let page = FetchedPage::parse(url(), b"<main><p>x</p></main>", &specs()).unwrap();
        assert_eq!(page.title, "");
    }

    #[test]
    fn test_parse_non_utf8() {
        let err = FetchedPage::parse(url(), &[0x3c, 0xff, 0xfe, 0x3e], &specs()).unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }

    #[test]
    fn test_parse_no_elements() {
        let err = FetchedPage::parse(url(), b"just some text", &specs()).unwrap_err();
        match err {
            FetchError::Parse { reason, .. } => assert!(reason.contains("no elements")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
