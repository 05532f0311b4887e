//! Fenced-code syntax highlighting.

use std::sync::OnceLock;

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::transform::{Transform, walk_mut};
use crate::tree::SyntaxNode;

/// Annotates code blocks with class-based token markup.
///
/// Tokenization never fails: an unrecognized (or absent) language tag
/// simply leaves `highlighted` unset and the serializer falls back to
/// escaped plain text. The verbatim `code` field is never modified, so the
/// copy affordance always carries the original source.
pub struct HighlightCode;

impl HighlightCode {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighlightCode {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for HighlightCode {
    fn name(&self) -> &'static str {
        "highlight"
    }

    fn apply(&self, mut tree: SyntaxNode) -> SyntaxNode {
        walk_mut(&mut tree, &mut |node| {
            if let SyntaxNode::CodeBlock {
                language: Some(language),
                code,
                highlighted,
            } = node
            {
                *highlighted = highlight(language, code);
            }
        });
        tree
    }
}

/// Syntax definitions are expensive to load; share one set per process.
fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

/// Produce `<span class="...">` token markup, or `None` when the language
/// is unknown or tokenization bails.
fn highlight(language: &str, code: &str) -> Option<String> {
    let set = syntax_set();
    let syntax = set.find_syntax_by_token(language)?;
    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, set, ClassStyle::Spaced);
    for line in LinesWithEndings::from(code) {
        if let Err(err) = generator.parse_html_for_line_which_includes_newline(line) {
            tracing::debug!(language, error = %err, "tokenization failed, plain fallback");
            return None;
        }
    }
    Some(generator.finalize())
}
