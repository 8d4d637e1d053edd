//! Djot render policy for a static blog.
//!
//! This crate turns a parsed djot document (the JSON AST produced by the
//! djot reference parser) into HTML, layering the blog's conventions over
//! the standard rendering rules:
//!
//! - sections titled by a level-1 heading are flattened
//! - the title heading gets the publish date, section headings self-link
//! - the first paragraph becomes the page summary
//! - image-only paragraphs and code blocks become figures
//! - `note`/`quiz`/`warn`/`block`/`details` divs become asides
//! - blockquotes ending in a lone link get a citation
//!
//! [`view`] is a separate, smaller renderer for inline span trees.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use quill_renderer::{Doc, RenderContext, render};
//!
//! let doc = Doc::from_json(r#"{"tag":"doc","children":[
//!     {"tag":"heading","level":1,"children":[{"tag":"str","text":"Launch"}]},
//!     {"tag":"para","children":[{"tag":"str","text":"We shipped."}]}
//! ]}"#).unwrap();
//!
//! let mut ctx = RenderContext::new().with_date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
//! let html = render(&doc, &mut ctx);
//!
//! assert!(html.as_str().contains(r#"<time datetime="2024-01-02">Jan 2, 2024</time></h1>"#));
//! assert_eq!(ctx.summary.as_deref(), Some("We shipped."));
//! ```

mod ast;
mod attributes;
mod context;
mod error;
mod highlight;
mod html;
mod overrides;
mod renderer;
mod time;
mod util;
pub mod view;
mod writer;

pub use ast::{
    Alignment, BulletList, Cell, Checkbox, CodeBlock, Container, Doc, Footnote, Heading, Leaf,
    Link, Node, OrderedList, Raw, Reference, Row, SmartPunctuation, Symb, TaskList, TaskListItem,
    Text,
};
pub use attributes::Attributes;
pub use context::RenderContext;
pub use error::{ParseError, RenderError, ViewError};
pub use highlight::{HighlightSpec, Highlighter, PlainHighlighter};
pub use html::Html;
pub use renderer::{Renderer, render};
pub use time::{DEFAULT_DATE_FORMAT, render_time};
pub use util::{escape_html, plain_text};
