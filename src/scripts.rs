//! Script reattachment after a swap.
//!
//! Scripts inside swapped regions arrive as inert markup, so the DOM cannot
//! tell which sources already ran. The reattacher keeps the absolute URL of
//! every script that has executed: the initial page's scripts (seeded from
//! the live document against its own location) and every script handed to
//! the host since. Each new `src` is appended once to `<body>` as a deferred
//! `<script>`; the host executes the returned URLs after the swap settles.

use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use smallvec::smallvec;
use url::Url;

use crate::core::resolve;
use crate::debug;
use crate::dom::{Document, Selector};
use crate::fetch::FetchedPage;

#[derive(Debug, Default)]
pub struct ScriptReattacher {
    /// Absolute URLs of scripts that ran in this document.
    executed: Mutex<FxHashSet<Url>>,
}

impl ScriptReattacher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the scripts of the current document, resolved against the
    /// document's own location. Returns how many were new.
    pub fn seed(&self, doc: &Document, location: &Url) -> usize {
        let mut executed = self.executed.lock();
        doc.query_all(doc.root(), &Selector::tag("script"))
            .into_iter()
            .filter_map(|id| doc.attr(id, "src"))
            .filter_map(|src| resolve(location, src).ok())
            .filter(|url| executed.insert(url.clone()))
            .count()
    }

    /// Append scripts of `page` that never ran, returning their URLs in
    /// discovery order. Sources resolve against the page's own URL.
    pub fn reattach(&self, doc: &mut Document, page: &FetchedPage) -> Vec<Url> {
        let mut executed = self.executed.lock();
        let body = doc.body();
        let mut added = Vec::new();

        for src in &page.script_sources {
            let url = match resolve(&page.url, src) {
                Ok(url) => url,
                Err(err) => {
                    debug!("scripts"; "skipping `{}`: {}", src, err);
                    continue;
                }
            };
            if !executed.insert(url.clone()) {
                continue;
            }

            let node = doc.create_element(
                "script",
                smallvec![
                    ("src".to_string(), url.to_string()),
                    ("defer".to_string(), String::new()),
                ],
            );
            doc.append_child(body, node);
            added.push(url);
        }
        added
    }

    pub fn has_run(&self, url: &Url) -> bool {
        self.executed.lock().contains(url)
    }
}
