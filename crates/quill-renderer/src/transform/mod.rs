//! Tree transform pipeline.
//!
//! Each stage is a pure `tree -> tree` rewrite; the pipeline applies its
//! stages in a fixed order. [`TransformPipeline::standard`] encodes the
//! ordering contract for rendering: heading ids are assigned before anchors
//! reference them, and the shell wrap comes last so it sees the finished
//! body.

mod anchors;
mod heading_ids;
mod highlight;
mod shell;

pub use anchors::InjectAnchors;
pub use heading_ids::AssignHeadingIds;
pub use highlight::HighlightCode;
pub use shell::WrapShell;

use crate::tree::SyntaxNode;

/// A single tree-to-tree rewrite stage.
pub trait Transform: Send + Sync {
    /// Stage name for logging.
    fn name(&self) -> &'static str;

    /// Rewrite the tree. Must be pure: same input tree, same output tree.
    fn apply(&self, tree: SyntaxNode) -> SyntaxNode;
}

/// An ordered sequence of [`Transform`] stages.
pub struct TransformPipeline {
    stages: Vec<Box<dyn Transform>>,
}

impl TransformPipeline {
    /// Pipeline with no stages; `run` is the identity.
    #[must_use]
    pub fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    /// The standard rendering pipeline, in its contractual order:
    /// id assignment, anchor injection, code highlighting, shell wrap.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with_stage(AssignHeadingIds)
            .with_stage(InjectAnchors)
            .with_stage(HighlightCode::new())
            .with_stage(WrapShell)
    }

    /// Append a stage.
    #[must_use]
    pub fn with_stage<T: Transform + 'static>(mut self, stage: T) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Apply all stages in order.
    #[must_use]
    pub fn run(&self, tree: SyntaxNode) -> SyntaxNode {
        self.stages.iter().fold(tree, |tree, stage| {
            tracing::debug!(stage = stage.name(), "applying transform");
            stage.apply(tree)
        })
    }
}

/// Depth-first, document-order walk calling `visit` on every node.
pub(crate) fn walk_mut(node: &mut SyntaxNode, visit: &mut impl FnMut(&mut SyntaxNode)) {
    visit(node);
    if let Some(children) = node.children_mut() {
        for child in children {
            walk_mut(child, visit);
        }
    }
}
