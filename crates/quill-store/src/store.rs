//! Content store trait and error types.
//!
//! A [`ContentStore`] hands the pipeline raw document text addressed by
//! slug. The pipeline never writes through it; backends only need to read.

/// A document as loaded from storage. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Filename-derived identifier.
    pub slug: String,
    /// Full file content: optional metadata header plus markdown body.
    pub raw_text: String,
}

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No backing document exists for the slug.
    #[error("no document found for slug `{0}`")]
    NotFound(String),
    /// The slug contains path separators or traversal components.
    #[error("invalid slug `{0}`")]
    InvalidSlug(String),
    /// The backing file exists but could not be read.
    #[error("failed to read document `{slug}`")]
    Io {
        slug: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read-only document storage addressed by slug.
///
/// Implementations must be safe to share across concurrent renders; all
/// methods take `&self`.
pub trait ContentStore: Send + Sync {
    /// Load the document for `slug`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when no document backs the slug.
    fn load(&self, slug: &str) -> Result<Document, StoreError>;

    /// Modification time of the backing document, as seconds since the
    /// Unix epoch. Used as a cache etag.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when no document backs the slug.
    fn mtime(&self, slug: &str) -> Result<f64, StoreError>;

    /// Whether a document exists for `slug`.
    fn exists(&self, slug: &str) -> bool {
        self.mtime(slug).is_ok()
    }

    /// All available slugs, sorted.
    ///
    /// # Errors
    ///
    /// Backend-specific I/O failure listing the store.
    fn slugs(&self) -> Result<Vec<String>, StoreError>;
}

/// Reject slugs that could address files outside the store.
///
/// Slugs are single path segments: no separators, no `..`, not empty and
/// not hidden-file prefixes.
pub(crate) fn validate_slug(slug: &str) -> Result<(), StoreError> {
    let invalid = slug.is_empty()
        || slug.contains(['/', '\\'])
        || slug == "."
        || slug == ".."
        || slug.starts_with('.');
    if invalid {
        return Err(StoreError::InvalidSlug(slug.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug_accepts_plain_names() {
        assert!(validate_slug("my-first-post").is_ok());
        assert!(validate_slug("post_2").is_ok());
    }

    #[test]
    fn test_validate_slug_rejects_traversal() {
        assert!(validate_slug("..").is_err());
        assert!(validate_slug("../etc/passwd").is_err());
        assert!(validate_slug("a/b").is_err());
        assert!(validate_slug("a\\b").is_err());
    }

    #[test]
    fn test_validate_slug_rejects_empty_and_hidden() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug(".hidden").is_err());
    }
}
