//! Cursor over a [`Tree`].

use std::fmt;

use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::error::ViewError;
use crate::html::Html;
use crate::util::escape_html;

use super::handlers;
use super::tree::{NodeId, RawReference, Tree};

/// Read-only view of one node in a [`Tree`].
///
/// Cheap to copy: it is an index plus two borrows. Navigation builds new
/// cursors on demand.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    tree: &'a Tree,
    id: NodeId,
    ctx: &'a RenderContext,
}

impl<'a> Node<'a> {
    pub(super) fn new(tree: &'a Tree, id: NodeId, ctx: &'a RenderContext) -> Self {
        Self { tree, id, ctx }
    }

    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn tag(self) -> &'a str {
        &self.tree.data(self.id).tag
    }

    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.tree
            .data(self.id)
            .parent
            .map(|id| Self::new(self.tree, id, self.ctx))
    }

    pub fn children(self) -> impl Iterator<Item = Node<'a>> + 'a {
        let Self { tree, ctx, .. } = self;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| Node::new(tree, id, ctx))
    }

    #[must_use]
    pub fn attributes(self) -> &'a Attributes {
        &self.tree.data(self.id).attributes
    }

    #[must_use]
    pub fn attr(self, key: &str) -> Option<&'a str> {
        self.attributes().get(key)
    }

    /// The `class` attribute, or an empty string.
    #[must_use]
    pub fn cls(self) -> &'a str {
        self.attr("class").unwrap_or_default()
    }

    #[must_use]
    pub fn has_class(self, name: &str) -> bool {
        self.attributes().has_class(name)
    }

    /// Own text, else the text of the first `str` child, else empty.
    #[must_use]
    pub fn text(self) -> &'a str {
        if let Some(text) = self.tree.data(self.id).text.as_deref() {
            return text;
        }
        self.children()
            .find(|child| child.tag() == "str")
            .and_then(|child| child.tree.data(child.id).text.as_deref())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn destination(self) -> Option<&'a str> {
        self.tree.data(self.id).destination.as_deref()
    }

    /// Label of the reference this node points to, if any.
    #[must_use]
    pub fn reference_id(self) -> Option<&'a str> {
        self.tree.data(self.id).reference.as_deref()
    }

    /// Look `id` up in the root's reference table.
    #[must_use]
    pub fn lookup_reference(self, id: &str) -> Option<&'a RawReference> {
        self.tree.data(self.root().id).references.get(id)
    }

    #[must_use]
    pub fn root(self) -> Self {
        let mut node = self;
        while let Some(parent) = node.parent() {
            node = parent;
        }
        node
    }

    #[must_use]
    pub fn is_root(self) -> bool {
        self.tree.data(self.id).parent.is_none()
    }

    #[must_use]
    pub fn ctx(self) -> &'a RenderContext {
        self.ctx
    }

    /// The same root over the same tree, with a different context.
    ///
    /// Only the root carries the context, so this fails on any other node.
    pub fn with_context<'b>(self, ctx: &'b RenderContext) -> Result<Node<'b>, ViewError>
    where
        'a: 'b,
    {
        if !self.is_root() {
            return Err(ViewError::NotRoot);
        }
        Ok(Node::new(self.tree, self.id, ctx))
    }

    /// Rendered output of all children, concatenated.
    #[must_use]
    pub fn content(self) -> String {
        self.children().map(|child| child.render().into_string()).collect()
    }

    /// Render this node.
    ///
    /// Failures do not propagate: the node is replaced by an inline
    /// diagnostic and rendering of its siblings continues.
    #[must_use]
    pub fn render(self) -> Html {
        match handlers::dispatch(self) {
            Ok(html) => Html::from_trusted(html),
            Err(err) => {
                tracing::warn!(
                    tag = self.tag(),
                    path = %self.path(),
                    error = %err,
                    "Failed to render inline node"
                );
                Html::from_trusted(self.diagnostic(&err))
            }
        }
    }

    /// Tags from the root down to this node, e.g. `doc > span > emph`.
    #[must_use]
    pub fn path(self) -> String {
        let mut tags = vec![self.tag()];
        let mut node = self;
        while let Some(parent) = node.parent() {
            tags.push(parent.tag());
            node = parent;
        }
        tags.reverse();
        tags.join(" > ")
    }

    fn diagnostic(self, err: &ViewError) -> String {
        let raw = serde_json::to_string_pretty(&self.tree.to_raw(self.id))
            .unwrap_or_else(|e| e.to_string());
        format!(
            "<strong>error: {}</strong><pre>{}</pre><pre>{}</pre>",
            escape_html(&err.to_string()),
            escape_html(&raw),
            escape_html(&self.path()),
        )
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("tag", &self.tag())
            .finish_non_exhaustive()
    }
}
