//! Arena storage for the inline view.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::error::ParseError;

use super::Node;

/// Loosely-typed node as it arrives from the parser.
///
/// Unlike [`crate::ast::Node`] this keeps any tag, so that the view can
/// decide per node whether it knows how to render it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawNode>,
    /// Reference table; only meaningful on the root.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub references: IndexMap<String, RawReference>,
}

/// Target of an indirect image or link.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReference {
    #[serde(default)]
    pub destination: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

/// Index of a node inside its [`Tree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
pub(super) struct NodeData {
    pub(super) tag: String,
    pub(super) text: Option<String>,
    pub(super) attributes: Attributes,
    pub(super) destination: Option<String>,
    pub(super) reference: Option<String>,
    pub(super) references: IndexMap<String, RawReference>,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

/// Immutable arena built from a [`RawNode`] tree.
///
/// Parent and child links are indices, so cursors into the tree are plain
/// `Copy` values.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<NodeData>,
}

impl Tree {
    pub(super) const ROOT: NodeId = NodeId(0);

    /// Parse a raw node tree from JSON.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let raw: RawNode = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    #[must_use]
    pub fn from_raw(raw: RawNode) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.push(raw, None);
        tree
    }

    /// Cursor on the root node, rendering with `ctx`.
    #[must_use]
    pub fn root<'a>(&'a self, ctx: &'a RenderContext) -> Node<'a> {
        Node::new(self, Self::ROOT, ctx)
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(super) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    /// Rebuild the raw subtree rooted at `id`.
    pub(super) fn to_raw(&self, id: NodeId) -> RawNode {
        let data = self.data(id);
        RawNode {
            tag: data.tag.clone(),
            text: data.text.clone(),
            attributes: data.attributes.clone(),
            destination: data.destination.clone(),
            reference: data.reference.clone(),
            children: data.children.iter().map(|&c| self.to_raw(c)).collect(),
            references: data.references.clone(),
        }
    }

    fn push(&mut self, raw: RawNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let RawNode {
            tag,
            text,
            attributes,
            destination,
            reference,
            children,
            references,
        } = raw;

        self.nodes.push(NodeData {
            tag,
            text,
            attributes,
            destination,
            reference,
            references,
            parent,
            children: Vec::with_capacity(children.len()),
        });
        for child in children {
            let child_id = self.push(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_from_raw_links_parents_and_children() {
        let tree = Tree::from_raw(raw(json!({
            "tag": "doc",
            "children": [
                {"tag": "emph", "children": [{"tag": "str", "text": "a"}]},
                {"tag": "str", "text": "b"}
            ]
        })));

        assert_eq!(tree.node_count(), 4);
        let root = tree.data(Tree::ROOT);
        assert_eq!(root.parent, None);
        assert_eq!(root.children, vec![NodeId(1), NodeId(3)]);
        assert_eq!(tree.data(NodeId(2)).parent, Some(NodeId(1)));
        assert_eq!(tree.data(NodeId(2)).text.as_deref(), Some("a"));
    }

    #[test]
    fn test_to_raw_rebuilds_subtree() {
        let original = raw(json!({
            "tag": "span",
            "attributes": {"class": "kbd"},
            "children": [{"tag": "str", "text": "Ctrl+C"}]
        }));
        let tree = Tree::from_raw(original.clone());
        assert_eq!(tree.to_raw(Tree::ROOT), original);
    }

    #[test]
    fn test_from_json_rejects_missing_tag() {
        assert!(Tree::from_json(r#"{"text":"x"}"#).is_err());
    }

    #[test]
    fn test_raw_node_serializes_compactly() {
        let node = raw(json!({"tag": "soft_break"}));
        assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"tag":"soft_break"}"#);
    }
}
