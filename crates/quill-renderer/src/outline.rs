//! Outline extraction.
//!
//! Walks the pre-serialization tree and records every heading as an
//! [`HeadingEntry`]. Extracting from the tree (rather than re-parsing the
//! rendered markup) is the only approach that cannot drift from the ids
//! actually emitted.

use serde::{Deserialize, Serialize};

use crate::tree::SyntaxNode;

/// One navigation entry, ordered by document position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// Anchor id, unique within one render.
    pub id: String,
    /// Flattened heading text.
    pub text: String,
    /// Heading level, 1-6.
    pub level: u8,
}

/// Collect heading entries in document order.
///
/// Headings without an assigned id (a pipeline that skipped id assignment)
/// are omitted, since they cannot be navigation targets. A document with no
/// headings yields an empty outline; that is not an error.
#[must_use]
pub fn extract_outline(tree: &SyntaxNode) -> Vec<HeadingEntry> {
    let mut entries = Vec::new();
    collect(tree, &mut entries);
    entries
}

fn collect(node: &SyntaxNode, entries: &mut Vec<HeadingEntry>) {
    if let SyntaxNode::Heading {
        level,
        id: Some(id),
        ..
    } = node
    {
        entries.push(HeadingEntry {
            id: id.clone(),
            text: node.flatten_text().trim().to_owned(),
            level: *level,
        });
    }
    if let Some(children) = node.children() {
        for child in children {
            collect(child, entries);
        }
    }
}
