//! Document renderer entry point.

use crate::ast::Doc;
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::highlight::{Highlighter, PlainHighlighter};
use crate::html::Html;
use crate::time::DEFAULT_DATE_FORMAT;
use crate::util::escape_html;
use crate::writer::HtmlWriter;

/// Renders djot documents to HTML with the blog's render policy.
///
/// # Example
///
/// ```
/// use quill_renderer::{Doc, RenderContext, Renderer};
///
/// let doc = Doc::from_json(
///     r#"{"tag":"doc","children":[{"tag":"para","children":[{"tag":"str","text":"Hello"}]}]}"#,
/// ).unwrap();
/// let mut ctx = RenderContext::new();
/// let html = Renderer::new().with_date_format("%Y-%m-%d").render(&doc, &mut ctx);
///
/// assert_eq!(html.as_str(), "<p>Hello</p>\n");
/// assert_eq!(ctx.summary.as_deref(), Some("Hello"));
/// ```
pub struct Renderer {
    highlighter: Box<dyn Highlighter>,
    date_format: String,
}

impl Renderer {
    /// Create a renderer with the plain highlighter and default date format.
    #[must_use]
    pub fn new() -> Self {
        Self {
            highlighter: Box::new(PlainHighlighter::default()),
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
        }
    }

    /// Use a different highlighter for code blocks.
    #[must_use]
    pub fn with_highlighter<H: Highlighter + 'static>(mut self, highlighter: H) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    /// Set the chrono format used to display the publish date.
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Render a document.
    ///
    /// Never fails: if anything goes wrong the whole output is replaced by a
    /// visible error message. `ctx.summary` may still have been set.
    pub fn render(&self, doc: &Doc, ctx: &mut RenderContext) -> Html {
        match self.try_render(doc, ctx) {
            Ok(html) => Html::from_trusted(html),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render document");
                Html::from_trusted(error_fragment(&err))
            }
        }
    }

    fn try_render(&self, doc: &Doc, ctx: &mut RenderContext) -> Result<String, RenderError> {
        let mut writer = HtmlWriter::new(doc, ctx, self.highlighter.as_ref(), &self.date_format);
        writer.render_document()?;
        Ok(writer.finish())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a document with the default [`Renderer`].
pub fn render(doc: &Doc, ctx: &mut RenderContext) -> Html {
    Renderer::new().render(doc, ctx)
}

fn error_fragment(err: &RenderError) -> String {
    format!(
        "<div class=\"render-error\"><strong>Render error:</strong> {}</div>\n",
        escape_html(&err.to_string())
    )
}
