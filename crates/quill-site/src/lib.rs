//! Site orchestration: configuration, page caching, and the
//! store-to-HTML render flow.
//!
//! The central type is [`Site`], which renders a slug into a
//! [`RenderedPage`] holding body HTML, header metadata, and a heading
//! outline:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use quill_site::{Config, Site};
//! use quill_store::FsStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load(std::path::Path::new("."))?;
//! let site = Site::new(Arc::new(FsStore::new(config.content.dir)));
//! let page = site.render("hello-world")?;
//! println!("{}", page.html);
//! # Ok(())
//! # }
//! ```

mod config;
mod page_cache;
mod site;

pub use config::{Config, ConfigError, ContentConfig, RenderConfig};
pub use page_cache::{MemoryPageCache, NullPageCache, PageCache};
pub use site::{RenderError, RenderedPage, Site};
