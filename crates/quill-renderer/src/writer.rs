//! Generic djot-to-HTML rules.
//!
//! [`HtmlWriter`] owns the output buffer and knows how to render every node
//! kind the plain way. Render policy lives in [`crate::overrides`]: every node
//! goes through [`HtmlWriter::render`], which lets the overrides intercept it
//! before falling back to [`HtmlWriter::render_default`].

use std::fmt::Write;

use indexmap::IndexSet;

use crate::ast::{Alignment, Checkbox, Container, Doc, Link, Node, OrderedList};
use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::highlight::Highlighter;
use crate::overrides;
use crate::util::{escape_html, plain_text};

/// Position of a node relative to the innermost enclosing section.
///
/// Passed by value down the recursion, so leaving a section restores the
/// outer scope without bookkeeping.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Scope<'s> {
    /// `id` of the innermost section, if it has one.
    section_id: Option<&'s str>,
    /// The nodes being rendered are direct children of that section.
    section_children: bool,
    /// This node is the first child of that section.
    first_in_section: bool,
}

impl<'s> Scope<'s> {
    /// Scope for the children of a section with the given `id`.
    pub(crate) fn section(id: Option<&'s str>) -> Self {
        Self {
            section_id: id,
            section_children: true,
            first_in_section: false,
        }
    }

    /// Scope of the child at `index` of a node rendered in `self`.
    fn child(self, index: usize) -> Self {
        Self {
            section_id: self.section_id,
            section_children: false,
            first_in_section: self.section_children && index == 0,
        }
    }

    pub(crate) fn section_id(self) -> Option<&'s str> {
        self.section_id
    }

    pub(crate) fn is_first_in_section(self) -> bool {
        self.first_in_section
    }
}

/// Writer handle shared by the default rules and the overrides.
pub(crate) struct HtmlWriter<'a> {
    doc: &'a Doc,
    pub(crate) ctx: &'a mut RenderContext,
    pub(crate) highlighter: &'a dyn Highlighter,
    pub(crate) date_format: &'a str,
    out: String,
    /// Paragraphs inside a tight list render without `<p>`.
    tight: bool,
    /// Footnote labels in order of first reference.
    footnotes: IndexSet<String>,
}

impl<'a> HtmlWriter<'a> {
    pub(crate) fn new(
        doc: &'a Doc,
        ctx: &'a mut RenderContext,
        highlighter: &'a dyn Highlighter,
        date_format: &'a str,
    ) -> Self {
        Self {
            doc,
            ctx,
            highlighter,
            date_format,
            out: String::with_capacity(4096),
            tight: false,
            footnotes: IndexSet::new(),
        }
    }

    /// Render the whole document followed by its endnotes.
    pub(crate) fn render_document(&mut self) -> Result<(), RenderError> {
        let doc = self.doc;
        self.render_children(&doc.children, Scope::default())?;
        self.render_endnotes()
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    /// Render a node, applying overrides.
    pub(crate) fn render<'s>(&mut self, node: &'s Node, scope: Scope<'s>) -> Result<(), RenderError> {
        overrides::render_node(self, node, scope)
    }

    /// Render only the children of a node.
    pub(crate) fn render_children<'s>(
        &mut self,
        children: &'s [Node],
        scope: Scope<'s>,
    ) -> Result<(), RenderError> {
        for (index, child) in children.iter().enumerate() {
            self.render(child, scope.child(index))?;
        }
        Ok(())
    }

    pub(crate) fn open_tag(&mut self, name: &str, attrs: &Attributes) -> Result<(), RenderError> {
        write!(self.out, "<{name}")?;
        for (key, value) in attrs.iter() {
            write!(self.out, r#" {key}="{}""#, escape_html(value))?;
        }
        self.out.push('>');
        Ok(())
    }

    pub(crate) fn close_tag(&mut self, name: &str) -> Result<(), RenderError> {
        write!(self.out, "</{name}>")?;
        Ok(())
    }

    /// Emit trusted markup as-is.
    pub(crate) fn literal(&mut self, markup: &str) {
        self.out.push_str(markup);
    }

    /// Emit text, escaping HTML metacharacters.
    pub(crate) fn escaped(&mut self, text: &str) {
        self.out.push_str(&escape_html(text));
    }

    /// Render a node with the built-in rules only.
    #[allow(clippy::too_many_lines)]
    pub(crate) fn render_default<'s>(
        &mut self,
        node: &'s Node,
        scope: Scope<'s>,
    ) -> Result<(), RenderError> {
        match node {
            Node::Section(n) => self.block("section", n, scope)?,
            Node::Div(n) => self.block("div", n, scope)?,
            Node::Blockquote(n) => self.block("blockquote", n, scope)?,
            Node::ListItem(n) => self.block("li", n, scope)?,
            Node::DefinitionList(n) => self.block("dl", n, scope)?,
            Node::Definition(n) => self.block("dd", n, scope)?,
            Node::Table(n) => self.block("table", n, scope)?,
            Node::Heading(n) => {
                let tag = format!("h{}", n.level.clamp(1, 6));
                self.open_tag(&tag, &n.attributes)?;
                self.render_children(&n.children, scope)?;
                self.close_tag(&tag)?;
                self.literal("\n");
            }
            Node::Para(n) => {
                if self.tight {
                    self.render_children(&n.children, scope)?;
                } else {
                    self.inline("p", &n.attributes, &n.children, scope)?;
                }
                self.literal("\n");
            }
            Node::ThematicBreak(n) => {
                self.open_tag("hr", &n.attributes)?;
                self.literal("\n");
            }
            Node::CodeBlock(n) => {
                self.open_tag("pre", &n.attributes)?;
                match n.lang.as_deref() {
                    Some(lang) => write!(self.out, r#"<code class="language-{}">"#, escape_html(lang))?,
                    None => self.literal("<code>"),
                }
                self.escaped(&n.text);
                self.literal("</code></pre>\n");
            }
            Node::RawBlock(n) | Node::RawInline(n) => {
                if n.format == "html" {
                    self.literal(&n.text);
                }
            }
            Node::BulletList(n) => self.list("ul", &n.attributes, n.tight, &n.children, scope)?,
            Node::OrderedList(n) => self.ordered_list(n, &n.attributes, scope)?,
            Node::TaskList(n) => {
                let mut attrs = n.attributes.clone();
                attrs.insert("class", n.attributes.class_attr_extra("task-list"));
                self.list("ul", &attrs, n.tight, &n.children, scope)?;
            }
            Node::TaskListItem(n) => {
                self.open_tag("li", &n.attributes)?;
                self.literal("\n");
                match n.checkbox {
                    Checkbox::Checked => self.literal(r#"<input disabled type="checkbox" checked>"#),
                    Checkbox::Unchecked => self.literal(r#"<input disabled type="checkbox">"#),
                }
                self.literal("\n");
                self.render_children(&n.children, scope)?;
                self.literal("</li>\n");
            }
            Node::DefinitionListItem(n) => self.render_children(&n.children, scope)?,
            Node::Term(n) => {
                self.inline("dt", &n.attributes, &n.children, scope)?;
                self.literal("\n");
            }
            Node::Caption(n) => {
                self.inline("caption", &n.attributes, &n.children, scope)?;
                self.literal("\n");
            }
            Node::Row(n) => {
                self.open_tag("tr", &n.attributes)?;
                self.literal("\n");
                self.render_children(&n.children, scope)?;
                self.literal("</tr>\n");
            }
            Node::Cell(n) => {
                let tag = if n.head { "th" } else { "td" };
                let mut attrs = n.attributes.clone();
                let align = match n.align {
                    Alignment::Default => None,
                    Alignment::Left => Some("left"),
                    Alignment::Right => Some("right"),
                    Alignment::Center => Some("center"),
                };
                if let Some(align) = align {
                    attrs.insert("style", format!("text-align: {align};"));
                }
                self.inline(tag, &attrs, &n.children, scope)?;
                self.literal("\n");
            }
            Node::Str(t) => self.escaped(&t.text),
            Node::SoftBreak(_) => self.literal("\n"),
            Node::HardBreak(_) => self.literal("<br>\n"),
            Node::NonBreakingSpace(_) => self.literal("&nbsp;"),
            Node::Symb(s) => write!(self.out, ":{}:", escape_html(&s.alias))?,
            Node::Verbatim(t) => {
                self.open_tag("code", &t.attributes)?;
                self.escaped(&t.text);
                self.literal("</code>");
            }
            Node::InlineMath(t) => {
                write!(self.out, r#"<span class="math inline">\({}\)</span>"#, escape_html(&t.text))?;
            }
            Node::DisplayMath(t) => {
                write!(self.out, r#"<span class="math display">\[{}\]</span>"#, escape_html(&t.text))?;
            }
            Node::Url(t) => {
                let url = escape_html(&t.text);
                write!(self.out, r#"<a href="{url}">{url}</a>"#)?;
            }
            Node::Email(t) => {
                let email = escape_html(&t.text);
                write!(self.out, r#"<a href="mailto:{email}">{email}</a>"#)?;
            }
            Node::FootnoteReference(t) => self.footnote_reference(&t.text)?,
            Node::SmartPunctuation(p) => self.escaped(p.glyph()),
            Node::Emph(n) => self.inline("em", &n.attributes, &n.children, scope)?,
            Node::Strong(n) => self.inline("strong", &n.attributes, &n.children, scope)?,
            Node::Span(n) => self.inline("span", &n.attributes, &n.children, scope)?,
            Node::Mark(n) => self.inline("mark", &n.attributes, &n.children, scope)?,
            Node::Superscript(n) => self.inline("sup", &n.attributes, &n.children, scope)?,
            Node::Subscript(n) => self.inline("sub", &n.attributes, &n.children, scope)?,
            Node::Insert(n) => self.inline("ins", &n.attributes, &n.children, scope)?,
            Node::Delete(n) => self.inline("del", &n.attributes, &n.children, scope)?,
            Node::DoubleQuoted(n) => {
                self.literal("\u{201C}");
                self.render_children(&n.children, scope)?;
                self.literal("\u{201D}");
            }
            Node::SingleQuoted(n) => {
                self.literal("\u{2018}");
                self.render_children(&n.children, scope)?;
                self.literal("\u{2019}");
            }
            Node::Link(link) => {
                let attrs = self.link_attributes(link, "href");
                self.inline("a", &attrs, &link.children, scope)?;
            }
            Node::Image(image) => {
                let mut attrs = Attributes::new();
                attrs.insert("alt", plain_text(&image.children));
                let resolved = self.link_attributes(image, "src");
                for (key, value) in resolved.iter() {
                    attrs.insert(key, value);
                }
                self.open_tag("img", &attrs)?;
            }
            Node::Unknown => return Err(RenderError::UnsupportedNode),
        }
        Ok(())
    }

    /// `<ol>` with `start`/`type` derived from the list and the given attributes.
    pub(crate) fn ordered_list<'s>(
        &mut self,
        list: &'s OrderedList,
        attributes: &Attributes,
        scope: Scope<'s>,
    ) -> Result<(), RenderError> {
        let mut attrs = Attributes::new();
        if let Some(start) = list.start.filter(|&s| s != 1) {
            attrs.insert("start", start.to_string());
        }
        if let Some(kind) = list.html_type() {
            attrs.insert("type", kind);
        }
        for (key, value) in attributes.iter() {
            attrs.insert(key, value);
        }
        self.list("ol", &attrs, list.tight, &list.children, scope)
    }

    fn block<'s>(
        &mut self,
        name: &str,
        node: &'s Container,
        scope: Scope<'s>,
    ) -> Result<(), RenderError> {
        self.open_tag(name, &node.attributes)?;
        self.literal("\n");
        self.render_children(&node.children, scope)?;
        self.close_tag(name)?;
        self.literal("\n");
        Ok(())
    }

    fn inline<'s>(
        &mut self,
        name: &str,
        attrs: &Attributes,
        children: &'s [Node],
        scope: Scope<'s>,
    ) -> Result<(), RenderError> {
        self.open_tag(name, attrs)?;
        self.render_children(children, scope)?;
        self.close_tag(name)
    }

    fn list<'s>(
        &mut self,
        name: &str,
        attrs: &Attributes,
        tight: bool,
        items: &'s [Node],
        scope: Scope<'s>,
    ) -> Result<(), RenderError> {
        let outer = std::mem::replace(&mut self.tight, tight);
        self.open_tag(name, attrs)?;
        self.literal("\n");
        self.render_children(items, scope)?;
        self.close_tag(name)?;
        self.literal("\n");
        self.tight = outer;
        Ok(())
    }

    /// Attributes for `<a>`/`<img>`: the target under `target_key`, then the
    /// node's attributes laid over those of its reference definition.
    fn link_attributes(&self, link: &Link, target_key: &str) -> Attributes {
        let mut attrs = Attributes::new();
        let own = match (&link.destination, &link.reference) {
            (Some(destination), _) => {
                attrs.insert(target_key, destination.as_str());
                link.attributes.clone()
            }
            (None, Some(label)) => match self.doc.reference(label) {
                Some(reference) => {
                    attrs.insert(target_key, reference.destination.as_str());
                    link.attributes.over(&reference.attributes)
                }
                None => {
                    tracing::warn!(reference = %label, "Unresolved reference");
                    link.attributes.clone()
                }
            },
            (None, None) => link.attributes.clone(),
        };
        for (key, value) in own.iter() {
            attrs.insert(key, value);
        }
        attrs
    }

    fn footnote_reference(&mut self, label: &str) -> Result<(), RenderError> {
        let (index, _) = self.footnotes.insert_full(label.to_owned());
        let n = index + 1;
        write!(
            self.out,
            r##"<a id="fnref{n}" href="#fn{n}" role="doc-noteref"><sup>{n}</sup></a>"##
        )?;
        Ok(())
    }

    /// Notes are numbered by first reference; notes referenced from other
    /// notes are appended as they are discovered.
    fn render_endnotes(&mut self) -> Result<(), RenderError> {
        if self.footnotes.is_empty() {
            return Ok(());
        }
        let doc = self.doc;
        self.literal("<section role=\"doc-endnotes\">\n<hr>\n<ol>\n");
        let mut index = 0;
        while let Some(label) = self.footnotes.get_index(index).cloned() {
            let n = index + 1;
            writeln!(self.out, r#"<li id="fn{n}">"#)?;
            match doc.footnotes.get(&label) {
                Some(note) => self.render_children(&note.children, Scope::default())?,
                None => tracing::warn!(footnote = %label, "Missing footnote definition"),
            }
            writeln!(
                self.out,
                "<p><a href=\"#fnref{n}\" role=\"doc-backlink\">\u{21A9}\u{FE0E}</a></p>\n</li>"
            )?;
            index += 1;
        }
        self.literal("</ol>\n</section>\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::PlainHighlighter;
    use crate::time::DEFAULT_DATE_FORMAT;
    use pretty_assertions::assert_eq;

    fn render_default_only(json: &str) -> String {
        let doc = Doc::from_json(json).unwrap();
        let mut ctx = RenderContext::new();
        let highlighter = PlainHighlighter::default();
        let mut writer = HtmlWriter::new(&doc, &mut ctx, &highlighter, DEFAULT_DATE_FORMAT);
        for child in &doc.children {
            writer.render_default(child, Scope::default()).unwrap();
        }
        writer.finish()
    }

    #[test]
    fn test_scope_marks_first_section_child() {
        let scope = Scope::section(Some("intro"));
        assert!(scope.child(0).is_first_in_section());
        assert!(!scope.child(1).is_first_in_section());
        assert!(!scope.child(0).child(0).is_first_in_section());
        assert_eq!(scope.child(0).child(0).section_id(), Some("intro"));
    }

    #[test]
    fn test_default_code_block() {
        let html = render_default_only(
            r#"{"tag":"doc","children":[{"tag":"code_block","lang":"sh","text":"a < b\n"}]}"#,
        );
        assert_eq!(html, "<pre><code class=\"language-sh\">a &lt; b\n</code></pre>\n");
    }

    #[test]
    fn test_default_ordered_list_start_and_type() {
        let html = render_default_only(
            r#"{"tag":"doc","children":[{"tag":"ordered_list","style":"a.","start":3,"tight":true,
                "children":[{"tag":"list_item","children":[{"tag":"para","children":[{"tag":"str","text":"x"}]}]}]}]}"#,
        );
        assert_eq!(html, "<ol start=\"3\" type=\"a\">\n<li>\nx\n</li>\n</ol>\n");
    }

    #[test]
    fn test_default_loose_list_keeps_paragraphs() {
        let html = render_default_only(
            r#"{"tag":"doc","children":[{"tag":"bullet_list","style":"-","tight":false,
                "children":[{"tag":"list_item","children":[{"tag":"para","children":[{"tag":"str","text":"x"}]}]}]}]}"#,
        );
        assert_eq!(html, "<ul>\n<li>\n<p>x</p>\n</li>\n</ul>\n");
    }

    #[test]
    fn test_default_table_alignment() {
        let html = render_default_only(
            r#"{"tag":"doc","children":[{"tag":"table","children":[
                {"tag":"row","head":true,"children":[{"tag":"cell","head":true,"align":"right","children":[{"tag":"str","text":"n"}]}]}
            ]}]}"#,
        );
        assert_eq!(
            html,
            "<table>\n<tr>\n<th style=\"text-align: right;\">n</th>\n</tr>\n</table>\n"
        );
    }

    #[test]
    fn test_default_link_via_reference() {
        let html = render_default_only(
            r#"{"tag":"doc","children":[{"tag":"para","children":[
                {"tag":"link","reference":"home","children":[{"tag":"str","text":"Home"}]}
            ]}],"references":{"home":{"tag":"reference","label":"home","destination":"/","attributes":{"class":"nav"}}}}"#,
        );
        assert_eq!(html, "<p><a href=\"/\" class=\"nav\">Home</a></p>\n");
    }

    #[test]
    fn test_default_image_alt_from_children() {
        let html = render_default_only(
            r#"{"tag":"doc","children":[{"tag":"para","children":[
                {"tag":"image","destination":"cat.png","children":[{"tag":"str","text":"A \"cat\""}]}
            ]}]}"#,
        );
        assert_eq!(html, "<p><img alt=\"A &quot;cat&quot;\" src=\"cat.png\"></p>\n");
    }

    #[test]
    fn test_default_raw_inline_only_html() {
        let html = render_default_only(
            r#"{"tag":"doc","children":[{"tag":"para","children":[
                {"tag":"raw_inline","format":"html","text":"<b>x</b>"},
                {"tag":"raw_inline","format":"latex","text":"\\LaTeX"}
            ]}]}"#,
        );
        assert_eq!(html, "<p><b>x</b></p>\n");
    }

    #[test]
    fn test_default_task_list() {
        let html = render_default_only(
            r#"{"tag":"doc","children":[{"tag":"task_list","tight":true,"children":[
                {"tag":"task_list_item","checkbox":"checked","children":[{"tag":"para","children":[{"tag":"str","text":"done"}]}]}
            ]}]}"#,
        );
        assert_eq!(
            html,
            "<ul class=\"task-list\">\n<li>\n<input disabled type=\"checkbox\" checked>\ndone\n</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_default_unknown_node_errors() {
        let doc = Doc::from_json(r#"{"tag":"doc","children":[{"tag":"mystery"}]}"#).unwrap();
        let mut ctx = RenderContext::new();
        let highlighter = PlainHighlighter::default();
        let mut writer = HtmlWriter::new(&doc, &mut ctx, &highlighter, DEFAULT_DATE_FORMAT);
        let err = writer.render_default(&doc.children[0], Scope::default()).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedNode));
    }

    #[test]
    fn test_footnotes_numbered_by_first_reference() {
        let doc = Doc::from_json(
            r#"{"tag":"doc","children":[{"tag":"para","children":[
                {"tag":"str","text":"a"},
                {"tag":"footnote_reference","text":"b"},
                {"tag":"footnote_reference","text":"a"}
            ]}],"footnotes":{
                "a":{"tag":"footnote","label":"a","children":[{"tag":"para","children":[{"tag":"str","text":"note a"}]}]},
                "b":{"tag":"footnote","label":"b","children":[{"tag":"para","children":[{"tag":"str","text":"note b"}]}]}
            }}"#,
        )
        .unwrap();
        let mut ctx = RenderContext::new();
        let highlighter = PlainHighlighter::default();
        let mut writer = HtmlWriter::new(&doc, &mut ctx, &highlighter, DEFAULT_DATE_FORMAT);
        writer.render_document().unwrap();
        let html = writer.finish();

        assert!(html.contains(r##"<a id="fnref1" href="#fn1" role="doc-noteref"><sup>1</sup></a>"##));
        let note_b = html.find("note b").unwrap();
        let note_a = html.find("note a").unwrap();
        assert!(note_b < note_a);
        assert!(html.contains("<section role=\"doc-endnotes\">"));
    }
}
