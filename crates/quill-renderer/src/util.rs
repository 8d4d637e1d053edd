//! Shared helpers: escaping and plain-text extraction.

use std::borrow::Cow;

use crate::ast::Node;

/// Escape text for use in HTML content and double-quoted attribute values.
///
/// # Examples
///
/// ```
/// use quill_renderer::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Flatten inline nodes to plain text.
///
/// Markup is dropped, smart punctuation becomes its typographic character,
/// breaks become spaces/newlines. Footnote references and raw content are
/// skipped.
#[must_use]
pub fn plain_text(nodes: &[Node]) -> String {
    let mut text = String::new();
    push_plain_text(nodes, &mut text);
    text
}

fn push_plain_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Str(t)
            | Node::Verbatim(t)
            | Node::InlineMath(t)
            | Node::DisplayMath(t)
            | Node::Url(t)
            | Node::Email(t) => out.push_str(&t.text),
            Node::SmartPunctuation(p) => out.push_str(p.glyph()),
            Node::Symb(s) => {
                out.push(':');
                out.push_str(&s.alias);
                out.push(':');
            }
            Node::SoftBreak(_) | Node::NonBreakingSpace(_) => out.push(' '),
            Node::HardBreak(_) => out.push('\n'),
            Node::DoubleQuoted(c) => {
                out.push('\u{201C}');
                push_plain_text(&c.children, out);
                out.push('\u{201D}');
            }
            Node::SingleQuoted(c) => {
                out.push('\u{2018}');
                push_plain_text(&c.children, out);
                out.push('\u{2019}');
            }
            Node::FootnoteReference(_) | Node::RawInline(_) | Node::RawBlock(_) => {}
            other => push_plain_text(other.children(), out),
        }
    }
}
