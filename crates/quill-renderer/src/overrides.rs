//! Blog-specific render policy layered over the default rules.
//!
//! Seven node kinds get special treatment; everything else renders with
//! [`HtmlWriter::render_default`]. Overrides never edit the caller's tree:
//! they render from borrowed slices or from a short-lived edited copy.

use crate::ast::{CodeBlock, Container, Heading, Link, Node, OrderedList, Raw};
use crate::attributes::Attributes;
use crate::error::RenderError;
use crate::highlight::HighlightSpec;
use crate::html::{SVG_ALERT, SVG_INFO, SVG_QUESTION};
use crate::time::render_time;
use crate::util::plain_text;
use crate::writer::{HtmlWriter, Scope};

/// Ordered-list marker that turns a list into a callout list.
const CALLOUT_STYLE: &str = "1)";

/// Admonition classes and their icons, in precedence order.
const ADMONITIONS: [(&str, &str); 3] = [
    ("note", SVG_INFO),
    ("quiz", SVG_QUESTION),
    ("warn", SVG_ALERT),
];

/// Route a node to its override, or to the default rules.
pub(crate) fn render_node<'s>(
    w: &mut HtmlWriter<'_>,
    node: &'s Node,
    scope: Scope<'s>,
) -> Result<(), RenderError> {
    match node {
        Node::Section(section) => render_section(w, node, section),
        Node::Heading(heading) => render_heading(w, node, heading, scope),
        Node::Para(para) => render_para(w, node, para, scope),
        Node::OrderedList(list) => render_ordered_list(w, node, list, scope),
        Node::Div(div) => render_div(w, node, div, scope),
        Node::CodeBlock(block) => render_code_block(w, block),
        Node::Blockquote(quote) => render_blockquote(w, quote, scope),
        _ => w.render_default(node, scope),
    }
}

/// Sections titled by a level-1 heading lose their wrapper; the page
/// template already provides one.
fn render_section<'s>(
    w: &mut HtmlWriter<'_>,
    node: &'s Node,
    section: &'s Container,
) -> Result<(), RenderError> {
    let id = section.attributes.get("id");
    let inner = Scope::section(id);
    let titled = section
        .children
        .iter()
        .any(|child| matches!(child, Node::Heading(h) if h.level == 1));

    if titled {
        tracing::debug!(id = ?id, "Flattening section with level-1 heading");
        w.render_children(&section.children, inner)
    } else {
        w.render_default(node, inner)
    }
}

/// Adds the publish date to the title and self-links section headings.
fn render_heading<'s>(
    w: &mut HtmlWriter<'_>,
    node: &'s Node,
    heading: &'s Heading,
    scope: Scope<'s>,
) -> Result<(), RenderError> {
    let date = w.ctx.date.filter(|_| heading.level == 1);
    let anchor = scope
        .section_id()
        .filter(|_| heading.level > 1 && scope.is_first_in_section());

    if date.is_none() && anchor.is_none() {
        return w.render_default(node, scope);
    }

    let mut edited = heading.clone();
    if let Some(date) = date {
        edited.children.push(Node::RawInline(Raw {
            format: "html".to_owned(),
            text: render_time(date, w.date_format)?,
            attributes: Attributes::new(),
        }));
    }
    if let Some(id) = anchor {
        let children = std::mem::take(&mut edited.children);
        edited.children.push(Node::Link(Link {
            destination: Some(format!("#{id}")),
            reference: None,
            attributes: Attributes::new(),
            children,
        }));
    }
    w.render_default(&Node::Heading(edited), scope)
}

/// Captures the summary and turns image-only paragraphs into figures.
fn render_para<'s>(
    w: &mut HtmlWriter<'_>,
    node: &'s Node,
    para: &'s Container,
    scope: Scope<'s>,
) -> Result<(), RenderError> {
    if w.ctx.offer_summary(|| plain_text(&para.children)) {
        tracing::debug!("Captured summary from first paragraph");
    }

    if let [Node::Image(_)] = para.children.as_slice() {
        w.open_tag("figure", &para.attributes.without("cap"))?;
        w.literal("\n");
        render_caption(w, &para.attributes);
        w.render_children(&para.children, scope)?;
        w.literal("\n</figure>\n");
        return Ok(());
    }

    w.render_default(node, scope)
}

fn render_ordered_list<'s>(
    w: &mut HtmlWriter<'_>,
    node: &'s Node,
    list: &'s OrderedList,
    scope: Scope<'s>,
) -> Result<(), RenderError> {
    if list.style != CALLOUT_STYLE {
        return w.render_default(node, scope);
    }
    let mut attrs = list.attributes.clone();
    attrs.insert("class", list.attributes.class_attr_extra("callout"));
    w.ordered_list(list, &attrs, scope)
}

/// Admonitions, titled blocks and collapsible details.
fn render_div<'s>(
    w: &mut HtmlWriter<'_>,
    node: &'s Node,
    div: &'s Container,
    scope: Scope<'s>,
) -> Result<(), RenderError> {
    let attrs = &div.attributes;

    if let Some((_, icon)) = ADMONITIONS.iter().find(|(class, _)| attrs.has_class(class)) {
        w.literal("<aside class=\"admn\">\n");
        w.literal(icon);
        w.literal("\n<div>\n");
        w.render_children(&div.children, scope)?;
        w.literal("</div>\n</aside>\n");
    } else if attrs.has_class("block") {
        w.literal("<aside class=\"block\">\n");
        if let Some(cap) = attrs.get("cap") {
            w.literal("<div class=\"title\">");
            w.escaped(cap);
            w.literal("</div>\n");
        }
        w.render_children(&div.children, scope)?;
        w.literal("</aside>\n");
    } else if attrs.has_class("details") {
        w.literal("<details>\n");
        if let Some(cap) = attrs.get("cap") {
            w.literal("<summary>");
            w.escaped(cap);
            w.literal("</summary>\n");
        }
        w.render_children(&div.children, scope)?;
        w.literal("</details>\n");
    } else {
        w.render_default(node, scope)?;
    }
    Ok(())
}

fn render_code_block(w: &mut HtmlWriter<'_>, block: &CodeBlock) -> Result<(), RenderError> {
    let spec = match block.attributes.get("highlight") {
        Some(spec) => HighlightSpec::parse(spec)?,
        None => HighlightSpec::default(),
    };
    let body = w
        .highlighter
        .highlight(&block.text, block.lang.as_deref(), &spec)?;

    w.literal("<figure class=\"code-block\">\n");
    render_caption(w, &block.attributes);
    w.literal(&body);
    w.literal("\n</figure>\n");
    Ok(())
}

/// A trailing paragraph holding a single link is the quote's source.
fn render_blockquote<'s>(
    w: &mut HtmlWriter<'_>,
    quote: &'s Container,
    scope: Scope<'s>,
) -> Result<(), RenderError> {
    let (body, source) = match quote.children.split_last() {
        Some((Node::Para(last), rest)) => match last.children.as_slice() {
            [link @ Node::Link(_)] => (rest, Some(link)),
            _ => (quote.children.as_slice(), None),
        },
        _ => (quote.children.as_slice(), None),
    };

    w.literal("<figure class=\"blockquote\">\n");
    w.open_tag("blockquote", &quote.attributes)?;
    w.literal("\n");
    w.render_children(body, scope)?;
    w.literal("</blockquote>\n");
    if let Some(link) = source {
        w.literal("<figcaption><cite>");
        w.render_default(link, scope)?;
        w.literal("</cite></figcaption>\n");
    }
    w.literal("</figure>\n");
    Ok(())
}

fn render_caption(w: &mut HtmlWriter<'_>, attrs: &Attributes) {
    if let Some(cap) = attrs.get("cap") {
        w.literal("<figcaption class=\"title\">");
        w.escaped(cap);
        w.literal("</figcaption>\n");
    }
}
