//! Pages fetched ahead of a click.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::fetch::FetchedPage;

/// Entries kept before the oldest is evicted.
pub const PRELOAD_CAPACITY: usize = 8;

/// Small FIFO of preloaded pages, keyed by URL without fragment.
/// Each entry serves a single navigation.
#[derive(Debug, Default)]
pub struct PreloadCache {
    entries: Mutex<VecDeque<(String, FetchedPage)>>,
}

impl PreloadCache {
    pub fn insert(&self, key: String, page: FetchedPage) {
        let mut entries = self.entries.lock();
        entries.retain(|(existing, _)| *existing != key);
        if entries.len() == PRELOAD_CAPACITY {
            entries.pop_front();
        }
        entries.push_back((key, page));
    }

    /// Remove and return the page for `key`.
    pub fn take(&self, key: &str) -> Option<FetchedPage> {
        let mut entries = self.entries.lock();
        let index = entries.iter().position(|(existing, _)| existing == key)?;
        entries.remove(index).map(|(_, page)| page)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().iter().any(|(existing, _)| existing == key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    fn page(path: &str) -> FetchedPage {
        FetchedPage {
            url: Url::parse("https://example.com").unwrap().join(path).unwrap(),
            title: path.to_string(),
            regions: Default::default(),
            script_sources: Vec::new(),
        }
    }

    #[test]
    fn test_take_consumes() {
        let cache = PreloadCache::default();
        cache.insert("a".into(), page("/a"));

        assert!(cache.contains("a"));
        assert_eq!(cache.take("a").unwrap().title, "/a");
        assert!(cache.take("a").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_reinsert_replaces() {
        let cache = PreloadCache::default();
        cache.insert("a".into(), page("/old"));
        cache.insert("a".into(), page("/new"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.take("a").unwrap().title, "/new");
    }

    #[test]
    fn test_evicts_oldest() {
        let cache = PreloadCache::default();
        for i in 0..=PRELOAD_CAPACITY {
            cache.insert(i.to_string(), page(&format!("/{i}")));
        }

        assert_eq!(cache.len(), PRELOAD_CAPACITY);
        assert!(!cache.contains("0"));
        assert!(cache.contains(&PRELOAD_CAPACITY.to_string()));
    }
}
