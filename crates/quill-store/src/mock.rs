//! In-memory store for testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::store::{ContentStore, Document, StoreError};

/// Mock [`ContentStore`] holding documents in memory.
///
/// Configure with the builder methods; mutate mtimes mid-test with
/// [`set_mtime`](Self::set_mtime) to exercise cache invalidation.
///
/// # Example
///
/// ```
/// use quill_store::{ContentStore, MockStore};
///
/// let store = MockStore::new().with_document("guide", "# Guide\n\nText.", 1000.0);
/// assert_eq!(store.load("guide").unwrap().raw_text, "# Guide\n\nText.");
/// ```
#[derive(Debug, Default)]
pub struct MockStore {
    documents: RwLock<HashMap<String, (String, f64)>>,
}

impl MockStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with raw text and mtime.
    #[must_use]
    pub fn with_document(
        self,
        slug: impl Into<String>,
        raw_text: impl Into<String>,
        mtime: f64,
    ) -> Self {
        self.documents
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(slug.into(), (raw_text.into(), mtime));
        self
    }

    /// Update the mtime of an existing document.
    pub fn set_mtime(&self, slug: &str, mtime: f64) {
        if let Some(entry) = self
            .documents
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get_mut(slug)
        {
            entry.1 = mtime;
        }
    }

    /// Replace the raw text of an existing document.
    pub fn set_text(&self, slug: &str, raw_text: impl Into<String>) {
        if let Some(entry) = self
            .documents
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get_mut(slug)
        {
            entry.0 = raw_text.into();
        }
    }
}

impl ContentStore for MockStore {
    fn load(&self, slug: &str) -> Result<Document, StoreError> {
        self.documents
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(slug)
            .map(|(raw_text, _)| Document {
                slug: slug.to_owned(),
                raw_text: raw_text.clone(),
            })
            .ok_or_else(|| StoreError::NotFound(slug.to_owned()))
    }

    fn mtime(&self, slug: &str) -> Result<f64, StoreError> {
        self.documents
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(slug)
            .map(|(_, mtime)| *mtime)
            .ok_or_else(|| StoreError::NotFound(slug.to_owned()))
    }

    fn slugs(&self) -> Result<Vec<String>, StoreError> {
        let mut slugs: Vec<String> = self
            .documents
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        slugs.sort();
        Ok(slugs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_load_and_mtime() {
        let store = MockStore::new().with_document("a", "text", 42.0);
        assert_eq!(store.load("a").unwrap().raw_text, "text");
        assert_eq!(store.mtime("a").unwrap(), 42.0);
    }

    #[test]
    fn test_missing_is_not_found() {
        let store = MockStore::new();
        assert!(matches!(store.load("x"), Err(StoreError::NotFound(_))));
        assert!(!store.exists("x"));
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_set_mtime_updates() {
        let store = MockStore::new().with_document("a", "text", 1.0);
        store.set_mtime("a", 2.0);
        assert_eq!(store.mtime("a").unwrap(), 2.0);
    }

    #[test]
    fn test_slugs_sorted() {
        let store = MockStore::new()
            .with_document("b", "", 0.0)
            .with_document("a", "", 0.0);
        assert_eq!(store.slugs().unwrap(), vec!["a", "b"]);
    }
}
