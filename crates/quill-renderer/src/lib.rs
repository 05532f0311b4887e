//! Markdown rendering pipeline for Quill.
//!
//! Turns a stored document (metadata header + markdown body) into HTML and
//! a navigational outline, in five stages:
//!
//! 1. [`parse_header`] splits and parses the `---` frontmatter block.
//! 2. [`parse_document`] converts the body into an owned [`SyntaxNode`] tree.
//! 3. A [`TransformPipeline`] applies ordered tree rewrites: heading-id
//!    assignment, anchor injection, code highlighting, shell wrapping.
//! 4. [`extract_outline`] records heading entries from the transformed tree.
//! 5. [`to_html`] serializes the tree to markup.
//!
//! Only the header parser can fail; body parsing and serialization are
//! total, and unsupported syntax degrades to literal text.
//!
//! # Example
//!
//! ```
//! use quill_renderer::{
//!     TransformPipeline, extract_outline, parse_document, parse_header, to_html,
//! };
//!
//! let raw = "---\ntitle: Hello\n---\n# Hello World\n\nSome *text*.";
//! let (meta, body) = parse_header(raw)?;
//! let tree = TransformPipeline::standard().run(parse_document(body));
//! let outline = extract_outline(&tree);
//! let html = to_html(&tree);
//!
//! assert_eq!(meta.title.as_deref(), Some("Hello"));
//! assert_eq!(outline[0].id, "hello-world");
//! assert!(html.contains(r#"<h1 id="hello-world">"#));
//! # Ok::<(), quill_renderer::HeaderError>(())
//! ```

mod frontmatter;
mod outline;
mod parse;
mod serialize;
pub mod transform;
mod tree;
mod util;

pub use frontmatter::{Frontmatter, HeaderError, parse_header};
pub use outline::{HeadingEntry, extract_outline};
pub use parse::parse_document;
pub use serialize::to_html;
pub use transform::{Transform, TransformPipeline};
pub use tree::{ListKind, SyntaxNode};
pub use util::{Slugger, escape_html, slugify};
