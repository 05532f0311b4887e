//! Markdown body parsing.
//!
//! Converts body text into a [`SyntaxNode`] tree. Lexing is delegated to
//! pulldown-cmark with all extensions disabled except heading attributes
//! (`{#id}`), keeping the supported surface to the documented subset:
//! headings, paragraphs, lists, emphasis, links, images and fenced code.
//!
//! The parser is total. Syntax outside the subset degrades to literal
//! text — inline code, raw HTML and footnote references all come through
//! as [`SyntaxNode::Text`], and container constructs the tree has no node
//! for (blockquotes, HTML blocks) are transparent: their children are
//! spliced into the parent. An unterminated fenced code block runs to the
//! end of the document; that is permissive-markdown behavior, not an
//! error.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::tree::{ListKind, SyntaxNode};

/// Parse body text into a [`SyntaxNode::Document`] root. Never fails.
#[must_use]
pub fn parse_document(body: &str) -> SyntaxNode {
    let parser = Parser::new_ext(body, Options::ENABLE_HEADING_ATTRIBUTES);
    let mut builder = TreeBuilder::default();
    for event in parser {
        builder.event(event);
    }
    builder.finish()
}

/// An open container awaiting its end tag.
enum Frame {
    Heading { level: u8, id: Option<String> },
    Paragraph,
    List { kind: ListKind },
    Item,
    Emphasis { strong: bool },
    Link { href: String },
    /// Container outside the subset; children splice into the parent.
    Transparent,
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<(Frame, Vec<SyntaxNode>)>,
    root: Vec<SyntaxNode>,
    /// Open fenced code block: (language, verbatim body).
    code: Option<(Option<String>, String)>,
    /// Open image: (src, alt buffer). While set, nested markup events are
    /// flattened into the alt text.
    image: Option<(String, String)>,
}

impl TreeBuilder {
    fn event(&mut self, event: Event<'_>) {
        // Inside an image, only the closing tag and text matter; alt text
        // is plain by construction.
        if self.image.is_some() {
            match event {
                Event::End(TagEnd::Image) => self.finish_image(),
                Event::Text(text) | Event::Code(text) => self.push_alt(&text),
                Event::SoftBreak | Event::HardBreak => self.push_alt(" "),
                _ => {}
            }
            return;
        }

        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(TagEnd::CodeBlock) => self.finish_code(),
            Event::End(TagEnd::Image) => self.finish_image(),
            Event::End(_) => self.end_frame(),
            Event::Text(text) => self.text(&text),
            // Inline code is outside the subset; keep the literal text.
            Event::Code(code) => self.text(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
            Event::SoftBreak | Event::HardBreak => self.text("\n"),
            Event::Rule => self.children().push(SyntaxNode::Paragraph {
                children: vec![SyntaxNode::Text("---".to_owned())],
            }),
            Event::FootnoteReference(name) => self.text(&format!("[^{name}]")),
            Event::TaskListMarker(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Extensions are disabled; these events cannot occur.
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph,
            Tag::Heading { level, id, .. } => Frame::Heading {
                level: heading_level_to_num(level),
                id: id.map(|s| s.to_string()),
            },
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => fence_language(&info),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((language, String::new()));
                return;
            }
            Tag::List(start) => Frame::List {
                kind: if start.is_some() {
                    ListKind::Ordered
                } else {
                    ListKind::Unordered
                },
            },
            Tag::Item => Frame::Item,
            Tag::Emphasis => Frame::Emphasis { strong: false },
            Tag::Strong => Frame::Emphasis { strong: true },
            Tag::Link { dest_url, .. } => Frame::Link {
                href: dest_url.to_string(),
            },
            Tag::Image { dest_url, .. } => {
                self.image = Some((dest_url.to_string(), String::new()));
                return;
            }
            // Everything else is outside the subset; keep the content,
            // drop the container.
            _ => Frame::Transparent,
        };
        self.stack.push((frame, Vec::new()));
    }

    fn end_frame(&mut self) {
        let Some((frame, children)) = self.stack.pop() else {
            return;
        };
        let node = match frame {
            Frame::Heading { level, id } => SyntaxNode::Heading {
                level,
                id,
                children,
            },
            Frame::Paragraph => SyntaxNode::Paragraph { children },
            Frame::List { kind } => SyntaxNode::List { kind, children },
            Frame::Item => SyntaxNode::ListItem { children },
            Frame::Emphasis { strong } => SyntaxNode::Emphasis { strong, children },
            Frame::Link { href } => SyntaxNode::Link { href, children },
            Frame::Transparent => {
                self.children().extend(children);
                return;
            }
        };
        self.children().push(node);
    }

    fn finish_code(&mut self) {
        if let Some((language, code)) = self.code.take() {
            self.children().push(SyntaxNode::CodeBlock {
                language,
                code,
                highlighted: None,
            });
        }
    }

    fn finish_image(&mut self) {
        if let Some((src, alt)) = self.image.take() {
            self.children().push(SyntaxNode::Image { src, alt });
        }
    }

    fn text(&mut self, text: &str) {
        if let Some((_, code)) = &mut self.code {
            code.push_str(text);
            return;
        }
        // Merge adjacent literal runs so degraded syntax reads naturally.
        if let Some(SyntaxNode::Text(last)) = self.children().last_mut() {
            last.push_str(text);
            return;
        }
        self.children().push(SyntaxNode::Text(text.to_owned()));
    }

    fn push_alt(&mut self, text: &str) {
        if let Some((_, alt)) = &mut self.image {
            alt.push_str(text);
        }
    }

    fn children(&mut self) -> &mut Vec<SyntaxNode> {
        match self.stack.last_mut() {
            Some((_, children)) => children,
            None => &mut self.root,
        }
    }

    fn finish(mut self) -> SyntaxNode {
        // Balanced event streams leave the stack empty; drain defensively
        // so a truncated stream still yields a complete tree.
        while !self.stack.is_empty() {
            self.end_frame();
        }
        SyntaxNode::Document {
            wrapped: false,
            children: self.root,
        }
    }
}

/// First token of the fence info string, or `None` for a bare fence.
fn fence_language(info: &str) -> Option<String> {
    info.split_whitespace().next().map(str::to_owned)
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
