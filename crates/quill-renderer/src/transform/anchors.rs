//! Heading anchor injection.

use crate::transform::{Transform, walk_mut};
use crate::tree::SyntaxNode;

/// Wraps each heading's content in a self-link to its assigned id, so a
/// click on the heading yields a shareable `#fragment` URL.
///
/// Must run after [`AssignHeadingIds`](crate::transform::AssignHeadingIds);
/// headings that still have no id (e.g. in a custom pipeline without id
/// assignment) are left untouched.
pub struct InjectAnchors;

impl Transform for InjectAnchors {
    fn name(&self) -> &'static str {
        "anchors"
    }

    fn apply(&self, mut tree: SyntaxNode) -> SyntaxNode {
        walk_mut(&mut tree, &mut |node| {
            if let SyntaxNode::Heading {
                id: Some(id),
                children,
                ..
            } = node
            {
                let label = std::mem::take(children);
                children.push(SyntaxNode::Link {
                    href: format!("#{id}"),
                    children: label,
                });
            }
        });
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_document;
    use crate::transform::AssignHeadingIds;

    #[test]
    fn test_heading_content_wrapped_in_self_link() {
        let tree = InjectAnchors.apply(AssignHeadingIds.apply(parse_document("# Hello World")));
        let SyntaxNode::Document { children, .. } = tree else {
            panic!("expected document");
        };
        let SyntaxNode::Heading { id, children, .. } = &children[0] else {
            panic!("expected heading");
        };
        assert_eq!(id.as_deref(), Some("hello-world"));
        assert_eq!(
            children.as_slice(),
            [SyntaxNode::Link {
                href: "#hello-world".to_owned(),
                children: vec![SyntaxNode::Text("Hello World".to_owned())],
            }]
        );
    }

    #[test]
    fn test_heading_without_id_untouched() {
        let tree = InjectAnchors.apply(parse_document("# Bare"));
        let SyntaxNode::Document { children, .. } = tree else {
            panic!("expected document");
        };
        let SyntaxNode::Heading { children, .. } = &children[0] else {
            panic!("expected heading");
        };
        assert_eq!(children.as_slice(), [SyntaxNode::Text("Bare".to_owned())]);
    }

    #[test]
    fn test_anchor_does_not_change_flattened_text() {
        let before = AssignHeadingIds.apply(parse_document("# Hello *World*"));
        let after = InjectAnchors.apply(before.clone());
        assert_eq!(before.flatten_text(), after.flatten_text());
    }
}
