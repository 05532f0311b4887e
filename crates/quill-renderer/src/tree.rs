//! Owned syntax tree produced by the markdown parser.
//!
//! Every render builds a fresh [`SyntaxNode`] tree, runs the transform
//! pipeline over it, and serializes it. Nodes are exclusively owned by the
//! render that created them; nothing is shared across renders.

/// List flavor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// Numbered list (`1.`, `2.`, ...).
    Ordered,
    /// Bulleted list (`-` or `*`).
    Unordered,
}

/// A node in the document syntax tree.
///
/// The grammar is deliberately small: headings, paragraphs, lists, fenced
/// code, emphasis, links and images. Anything outside it degrades to
/// [`SyntaxNode::Text`] at parse time, so every tree is renderable.
#[derive(Clone, Debug, PartialEq)]
pub enum SyntaxNode {
    /// Root node. `wrapped` is set by the shell transform when the rendered
    /// body should be enclosed in an `<article>` container.
    Document {
        wrapped: bool,
        children: Vec<SyntaxNode>,
    },
    /// Heading, level 1-6. `id` is `None` until the id-assignment transform
    /// runs, unless the source carried an explicit `{#id}` attribute.
    Heading {
        level: u8,
        id: Option<String>,
        children: Vec<SyntaxNode>,
    },
    Paragraph {
        children: Vec<SyntaxNode>,
    },
    List {
        kind: ListKind,
        children: Vec<SyntaxNode>,
    },
    ListItem {
        children: Vec<SyntaxNode>,
    },
    /// Fenced code block. `code` is the verbatim fence body; `highlighted`
    /// holds token markup once the highlight transform has run.
    CodeBlock {
        language: Option<String>,
        code: String,
        highlighted: Option<String>,
    },
    /// Literal inline text (also the fallback for unsupported syntax).
    Text(String),
    Emphasis {
        strong: bool,
        children: Vec<SyntaxNode>,
    },
    Link {
        href: String,
        children: Vec<SyntaxNode>,
    },
    Image {
        src: String,
        alt: String,
    },
}

impl SyntaxNode {
    /// Empty document root.
    #[must_use]
    pub fn empty_document() -> Self {
        Self::Document {
            wrapped: false,
            children: Vec::new(),
        }
    }

    /// Child nodes, if this node kind has any.
    #[must_use]
    pub fn children(&self) -> Option<&[SyntaxNode]> {
        match self {
            Self::Document { children, .. }
            | Self::Heading { children, .. }
            | Self::Paragraph { children }
            | Self::List { children, .. }
            | Self::ListItem { children }
            | Self::Emphasis { children, .. }
            | Self::Link { children, .. } => Some(children),
            Self::CodeBlock { .. } | Self::Text(_) | Self::Image { .. } => None,
        }
    }

    /// Mutable child nodes, if this node kind has any.
    pub fn children_mut(&mut self) -> Option<&mut Vec<SyntaxNode>> {
        match self {
            Self::Document { children, .. }
            | Self::Heading { children, .. }
            | Self::Paragraph { children }
            | Self::List { children, .. }
            | Self::ListItem { children }
            | Self::Emphasis { children, .. }
            | Self::Link { children, .. } => Some(children),
            Self::CodeBlock { .. } | Self::Text(_) | Self::Image { .. } => None,
        }
    }

    /// Concatenated text content of this node and its descendants.
    ///
    /// Image alt text is included, matching how heading text reads when an
    /// image sits inside a heading. Code blocks contribute nothing.
    #[must_use]
    pub fn flatten_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Image { alt, .. } => out.push_str(alt),
            Self::CodeBlock { .. } => {}
            _ => {
                if let Some(children) = self.children() {
                    for child in children {
                        child.collect_text(out);
                    }
                }
            }
        }
    }
}
