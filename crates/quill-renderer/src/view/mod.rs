//! Inline view over a loosely-typed node tree.
//!
//! Used for content that arrives already parsed into inline spans: images,
//! keyboard shortcuts and menu paths. Unlike the document renderer, every
//! node is its own error boundary, so one bad span degrades in place.
//!
//! ```
//! use quill_renderer::RenderContext;
//! use quill_renderer::view::Tree;
//!
//! let tree = Tree::from_json(
//!     r#"{"tag":"span","attributes":{"class":"kbd"},"children":[{"tag":"str","text":"Ctrl+C"}]}"#,
//! ).unwrap();
//! let ctx = RenderContext::default();
//! assert_eq!(tree.root(&ctx).render().as_str(), "<kbd>Ctrl</kbd>+<kbd>C</kbd>");
//! ```

mod handlers;
mod node;
mod tree;

pub use node::Node;
pub use tree::{NodeId, RawNode, RawReference, Tree};
