//! Document-shell wrapping.

use crate::transform::Transform;
use crate::tree::SyntaxNode;

/// Marks the document root for shell wrapping: the serializer encloses the
/// rendered body in an `<article class="quill-document">` container, giving
/// the consuming view one stable mount element to style.
pub struct WrapShell;

impl Transform for WrapShell {
    fn name(&self) -> &'static str {
        "shell"
    }

    fn apply(&self, mut tree: SyntaxNode) -> SyntaxNode {
        if let SyntaxNode::Document { wrapped, .. } = &mut tree {
            *wrapped = true;
        }
        tree
    }
}
