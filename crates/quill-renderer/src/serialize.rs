//! Tree-to-HTML serialization.
//!
//! One fixed template per node kind; every kind has a rendering, so
//! serialization is total and cannot fail. Writes into a single output
//! buffer, no I/O.

use std::fmt::Write;

use crate::tree::{ListKind, SyntaxNode};
use crate::util::escape_html;

/// Render the tree to an HTML string.
#[must_use]
pub fn to_html(tree: &SyntaxNode) -> String {
    let mut out = String::with_capacity(1024);
    write_node(tree, &mut out);
    out
}

fn write_node(node: &SyntaxNode, out: &mut String) {
    match node {
        SyntaxNode::Document { wrapped, children } => {
            if *wrapped {
                out.push_str(r#"<article class="quill-document">"#);
            }
            write_children(children, out);
            if *wrapped {
                out.push_str("</article>");
            }
        }
        SyntaxNode::Heading {
            level,
            id,
            children,
        } => {
            match id {
                Some(id) => write!(out, r#"<h{level} id="{}">"#, escape_html(id)).unwrap(),
                None => write!(out, "<h{level}>").unwrap(),
            }
            write_children(children, out);
            write!(out, "</h{level}>").unwrap();
        }
        SyntaxNode::Paragraph { children } => {
            out.push_str("<p>");
            write_children(children, out);
            out.push_str("</p>");
        }
        SyntaxNode::List { kind, children } => {
            let tag = match kind {
                ListKind::Ordered => "ol",
                ListKind::Unordered => "ul",
            };
            write!(out, "<{tag}>").unwrap();
            write_children(children, out);
            write!(out, "</{tag}>").unwrap();
        }
        SyntaxNode::ListItem { children } => {
            out.push_str("<li>");
            write_children(children, out);
            out.push_str("</li>");
        }
        SyntaxNode::CodeBlock {
            language,
            code,
            highlighted,
        } => write_code_block(language.as_deref(), code, highlighted.as_deref(), out),
        SyntaxNode::Text(text) => out.push_str(&escape_html(text)),
        SyntaxNode::Emphasis { strong, children } => {
            let tag = if *strong { "strong" } else { "em" };
            write!(out, "<{tag}>").unwrap();
            write_children(children, out);
            write!(out, "</{tag}>").unwrap();
        }
        SyntaxNode::Link { href, children } => {
            write!(out, r#"<a href="{}">"#, escape_html(href)).unwrap();
            write_children(children, out);
            out.push_str("</a>");
        }
        SyntaxNode::Image { src, alt } => {
            write!(
                out,
                r#"<img src="{}" alt="{}">"#,
                escape_html(src),
                escape_html(alt)
            )
            .unwrap();
        }
    }
}

/// Code block template: a `<figure>` holding the copy affordance and the
/// `<pre><code>` body. The copy button's `data-copy` attribute carries the
/// raw fence body (attribute-escaped only), so copying always yields the
/// original source regardless of tokenization.
fn write_code_block(
    language: Option<&str>,
    code: &str,
    highlighted: Option<&str>,
    out: &mut String,
) {
    out.push_str(r#"<figure class="code-block""#);
    if let Some(language) = language {
        write!(out, r#" data-language="{}""#, escape_html(language)).unwrap();
    }
    out.push('>');
    write!(
        out,
        r#"<button class="copy-button" type="button" data-copy="{}">Copy</button>"#,
        escape_html(code)
    )
    .unwrap();
    match language {
        Some(language) => write!(
            out,
            r#"<pre><code class="language-{}">"#,
            escape_html(language)
        )
        .unwrap(),
        None => out.push_str("<pre><code>"),
    }
    match highlighted {
        Some(markup) => out.push_str(markup),
        None => out.push_str(&escape_html(code)),
    }
    out.push_str("</code></pre></figure>");
}

fn write_children(children: &[SyntaxNode], out: &mut String) {
    for child in children {
        write_node(child, out);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parse::parse_document;

    #[test]
    fn test_paragraph_and_emphasis() {
        let html = to_html(&parse_document("Some *text* and **more**."));
        assert_eq!(
            html,
            "<p>Some <em>text</em> and <strong>more</strong>.</p>"
        );
    }

    #[test]
    fn test_heading_without_id() {
        assert_eq!(to_html(&parse_document("## Title")), "<h2>Title</h2>");
    }

    #[test]
    fn test_heading_with_id() {
        let node = SyntaxNode::Heading {
            level: 2,
            id: Some("title".to_owned()),
            children: vec![SyntaxNode::Text("Title".to_owned())],
        };
        assert_eq!(to_html(&node), r#"<h2 id="title">Title</h2>"#);
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            to_html(&parse_document("- a\n- b")),
            "<ul><li>a</li><li>b</li></ul>"
        );
        assert_eq!(
            to_html(&parse_document("1. a\n2. b")),
            "<ol><li>a</li><li>b</li></ol>"
        );
    }

    #[test]
    fn test_link_and_image() {
        assert_eq!(
            to_html(&parse_document("[docs](https://example.com)")),
            r#"<p><a href="https://example.com">docs</a></p>"#
        );
        assert_eq!(
            to_html(&parse_document("![Alt](img.png)")),
            r#"<p><img src="img.png" alt="Alt"></p>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(
            to_html(&parse_document("a <b>bold</b> & loud claim")),
            "<p>a &lt;b&gt;bold&lt;/b&gt; &amp; loud claim</p>"
        );
    }

    #[test]
    fn test_code_block_plain_fallback() {
        let html = to_html(&parse_document("```\nlet x = 1;\n```"));
        assert_eq!(
            html,
            concat!(
                r#"<figure class="code-block">"#,
                r#"<button class="copy-button" type="button" data-copy="let x = 1;"#,
                "\n",
                r#"">Copy</button>"#,
                "<pre><code>let x = 1;\n</code></pre></figure>"
            )
        );
    }

    #[test]
    fn test_code_block_language_class_and_data_attr() {
        let html = to_html(&parse_document("```rust\nfn main() {}\n```"));
        assert!(html.contains(r#"data-language="rust""#));
        assert!(html.contains(r#"<code class="language-rust">"#));
    }

    #[test]
    fn test_copy_payload_is_escaped_raw_source() {
        let html = to_html(&parse_document("```\na < b && \"quote\"\n```"));
        assert!(
            html.contains(r#"data-copy="a &lt; b &amp;&amp; &quot;quote&quot;"#),
            "{html}"
        );
    }

    #[test]
    fn test_shell_wraps_body() {
        let tree = SyntaxNode::Document {
            wrapped: true,
            children: vec![SyntaxNode::Paragraph {
                children: vec![SyntaxNode::Text("hi".to_owned())],
            }],
        };
        assert_eq!(
            to_html(&tree),
            r#"<article class="quill-document"><p>hi</p></article>"#
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_html(&parse_document("")), "");
    }
}
