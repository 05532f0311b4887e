//! Rendered-page caching.
//!
//! A [`PageCache`] stores finished [`RenderedPage`]s keyed by slug, with
//! the source mtime as etag: an entry is valid only while the stored mtime
//! matches the current one, so editing a document invalidates its entry on
//! the next render. Caching is optional — [`NullPageCache`] disables it
//! without a second code path in the orchestrator.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::site::RenderedPage;

/// Cache for rendered pages, etag-validated by source mtime.
pub trait PageCache: Send + Sync {
    /// Retrieve the entry for `slug` if it was stored with this mtime.
    fn get(&self, slug: &str, source_mtime: f64) -> Option<RenderedPage>;

    /// Store an entry, replacing any previous one for the slug.
    fn set(&self, slug: &str, source_mtime: f64, page: &RenderedPage);

    /// Drop the entry for `slug`, if any.
    fn invalidate(&self, slug: &str);
}

/// No-op cache: every lookup misses, every store is discarded.
#[derive(Debug, Default)]
pub struct NullPageCache;

impl PageCache for NullPageCache {
    fn get(&self, _slug: &str, _source_mtime: f64) -> Option<RenderedPage> {
        None
    }

    fn set(&self, _slug: &str, _source_mtime: f64, _page: &RenderedPage) {}

    fn invalidate(&self, _slug: &str) {}
}

/// Process-local in-memory cache.
///
/// Lazily filled, thread-safe, bounded only by the number of documents.
/// Entries whose stored mtime no longer matches are treated as misses and
/// overwritten by the next `set`.
#[derive(Debug, Default)]
pub struct MemoryPageCache {
    entries: RwLock<HashMap<String, (f64, RenderedPage)>>,
}

impl MemoryPageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageCache for MemoryPageCache {
    fn get(&self, slug: &str, source_mtime: f64) -> Option<RenderedPage> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let (stored_mtime, page) = entries.get(slug)?;
        // Tolerate sub-millisecond drift from serialization round trips.
        if (stored_mtime - source_mtime).abs() > 0.001 {
            return None;
        }
        tracing::debug!(slug, "page cache hit");
        Some(page.clone())
    }

    fn set(&self, slug: &str, source_mtime: f64, page: &RenderedPage) {
        self.entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(slug.to_owned(), (source_mtime, page.clone()));
    }

    fn invalidate(&self, slug: &str) {
        self.entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(slug);
    }
}

#[cfg(test)]
mod tests {
    use quill_renderer::Frontmatter;

    use super::*;

    fn page(html: &str) -> RenderedPage {
        RenderedPage {
            html: html.to_owned(),
            meta: Frontmatter::default(),
            outline: Vec::new(),
        }
    }

    #[test]
    fn test_null_cache_always_misses() {
        let cache = NullPageCache;
        cache.set("a", 1.0, &page("<p>x</p>"));
        assert!(cache.get("a", 1.0).is_none());
    }

    #[test]
    fn test_memory_cache_roundtrip() {
        let cache = MemoryPageCache::new();
        cache.set("a", 1.0, &page("<p>x</p>"));
        assert_eq!(cache.get("a", 1.0).unwrap().html, "<p>x</p>");
    }

    #[test]
    fn test_memory_cache_mtime_mismatch_misses() {
        let cache = MemoryPageCache::new();
        cache.set("a", 1.0, &page("<p>x</p>"));
        assert!(cache.get("a", 2.0).is_none());
    }

    #[test]
    fn test_memory_cache_tolerates_tiny_drift() {
        let cache = MemoryPageCache::new();
        cache.set("a", 1.0, &page("<p>x</p>"));
        assert!(cache.get("a", 1.0004).is_some());
    }

    #[test]
    fn test_memory_cache_invalidate() {
        let cache = MemoryPageCache::new();
        cache.set("a", 1.0, &page("<p>x</p>"));
        cache.invalidate("a");
        assert!(cache.get("a", 1.0).is_none());
    }
}
