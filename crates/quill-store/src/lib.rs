//! Document storage for Quill.
//!
//! The rendering pipeline reads documents through the [`ContentStore`]
//! trait, keeping site logic independent of where content lives:
//!
//! - [`FsStore`]: directory of `*.md` files, filename minus extension is
//!   the slug, with a lazily-filled directory listing cache.
//! - [`MockStore`]: in-memory documents for tests (behind the `mock`
//!   feature).
//!
//! Storage is read-only from the pipeline's perspective; no method writes
//! to the backing documents.

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod store;

pub use fs::FsStore;
#[cfg(feature = "mock")]
pub use mock::MockStore;
pub use store::{ContentStore, Document, StoreError};
