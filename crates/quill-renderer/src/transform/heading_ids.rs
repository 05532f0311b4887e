//! Stable heading-id assignment.

use crate::transform::{Transform, walk_mut};
use crate::tree::SyntaxNode;
use crate::util::{Slugger, slugify};

/// Assigns a unique id to every heading, in document order.
///
/// An explicit id (from a `{#id}` attribute) is kept as the preferred
/// value; otherwise the id derives from the heading's flattened text.
/// Either way the id goes through the render's collision pool, so the
/// first heading with a given text wins the bare id and later duplicates
/// get `-2`, `-3`, ... — deterministic and order-dependent.
pub struct AssignHeadingIds;

impl Transform for AssignHeadingIds {
    fn name(&self) -> &'static str {
        "heading-ids"
    }

    fn apply(&self, mut tree: SyntaxNode) -> SyntaxNode {
        let mut slugger = Slugger::new();
        walk_mut(&mut tree, &mut |node| {
            if matches!(node, SyntaxNode::Heading { .. }) {
                let text = node.flatten_text();
                if let SyntaxNode::Heading { id, .. } = node {
                    let base = id.take().unwrap_or_else(|| slugify(&text));
                    *id = Some(slugger.claim(&base));
                }
            }
        });
        tree
    }
}
