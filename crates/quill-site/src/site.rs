//! The rendering orchestrator.
//!
//! [`Site`] ties the pieces together: it loads raw documents from a
//! [`ContentStore`], splits off and parses the YAML header, parses the body
//! into a syntax tree, runs the transform pipeline, and serializes page
//! HTML plus an outline. Finished pages are cached against the source
//! mtime, so repeat renders of an unchanged document skip the whole
//! pipeline.

use std::sync::Arc;

use quill_renderer::transform::{AssignHeadingIds, HighlightCode, InjectAnchors};
use quill_renderer::{
    extract_outline, parse_document, parse_header, to_html, Frontmatter, HeaderError,
    HeadingEntry, TransformPipeline,
};
use quill_store::{ContentStore, FsStore, StoreError};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::page_cache::{MemoryPageCache, NullPageCache, PageCache};

/// A fully rendered document, ready to embed in a page.
///
/// Serializable so rendered pages can be persisted or shipped as JSON.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RenderedPage {
    /// Page body HTML. An embeddable fragment, not a full HTML document.
    pub html: String,
    /// Parsed header metadata. Empty when the document has no header.
    pub meta: Frontmatter,
    /// One entry per identified heading, in document order.
    pub outline: Vec<HeadingEntry>,
}

/// Errors surfaced by [`Site::render`].
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No document exists for the requested slug.
    #[error("no document found for slug `{0}`")]
    NotFound(String),
    /// The document begins a header fence that is unterminated or holds
    /// invalid YAML.
    #[error("malformed header in `{slug}`")]
    MalformedHeader {
        slug: String,
        #[source]
        source: HeaderError,
    },
    /// The store failed for a reason other than a missing document.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Renders documents from a content store through the transform pipeline.
pub struct Site {
    store: Arc<dyn ContentStore>,
    pipeline: TransformPipeline,
    cache: Box<dyn PageCache>,
}

impl Site {
    /// Create a site with the standard pipeline and an in-memory page
    /// cache.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            pipeline: TransformPipeline::standard(),
            cache: Box::new(MemoryPageCache::new()),
        }
    }

    /// Create a site from configuration: content is read from
    /// `config.content.dir`, and caching and the document shell follow the
    /// `[render]` toggles.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut site = Self::new(Arc::new(FsStore::new(&config.content.dir)));
        if !config.render.shell {
            site.pipeline = TransformPipeline::empty()
                .with_stage(AssignHeadingIds)
                .with_stage(InjectAnchors)
                .with_stage(HighlightCode::new());
        }
        if !config.render.cache {
            site.cache = Box::new(NullPageCache);
        }
        site
    }

    /// Replace the transform pipeline.
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: TransformPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Replace the page cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Box<dyn PageCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Disable page caching.
    #[must_use]
    pub fn without_cache(self) -> Self {
        self.with_cache(Box::new(NullPageCache))
    }

    /// Render the document identified by `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotFound`] when no document exists for the
    /// slug, [`RenderError::MalformedHeader`] when the document opens a
    /// header fence that cannot be parsed, and [`RenderError::Store`] for
    /// other storage failures.
    pub fn render(&self, slug: &str) -> Result<RenderedPage, RenderError> {
        let mtime = self.store.mtime(slug).map_err(map_store_error)?;
        if let Some(page) = self.cache.get(slug, mtime) {
            return Ok(page);
        }

        let document = self.store.load(slug).map_err(map_store_error)?;
        let (meta, body) =
            parse_header(&document.raw_text).map_err(|source| RenderError::MalformedHeader {
                slug: slug.to_owned(),
                source,
            })?;

        let tree = self.pipeline.run(parse_document(body));
        let outline = extract_outline(&tree);
        let html = to_html(&tree);

        let page = RenderedPage {
            html,
            meta,
            outline,
        };
        self.cache.set(slug, mtime, &page);
        tracing::debug!(slug, "rendered page");
        Ok(page)
    }

    /// Slugs of every renderable document, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Store`] when the store cannot be listed.
    pub fn slugs(&self) -> Result<Vec<String>, RenderError> {
        Ok(self.store.slugs()?)
    }
}

fn map_store_error(err: StoreError) -> RenderError {
    match err {
        StoreError::NotFound(slug) | StoreError::InvalidSlug(slug) => {
            RenderError::NotFound(slug)
        }
        other => RenderError::Store(other),
    }
}
