//! Djot document tree.
//!
//! Mirrors the JSON AST produced by the djot reference parser
//! (`djot -t ast --json`). Every node carries a `"tag"` field naming its kind;
//! kinds this crate does not know deserialize to [`Node::Unknown`] so that a
//! newer parser does not make whole documents unreadable.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::attributes::Attributes;
use crate::error::ParseError;

/// Root of a parsed djot document.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Doc {
    /// Top-level blocks.
    #[serde(default)]
    pub children: Vec<Node>,
    /// Explicit reference definitions (`[label]: url`).
    #[serde(default)]
    pub references: IndexMap<String, Reference>,
    /// Implicit references created for headings.
    #[serde(default, rename = "autoReferences")]
    pub auto_references: IndexMap<String, Reference>,
    /// Footnote definitions by label.
    #[serde(default)]
    pub footnotes: IndexMap<String, Footnote>,
}

impl Doc {
    /// Parse a document from the djot JSON AST.
    ///
    /// # Example
    ///
    /// ```
    /// use quill_renderer::Doc;
    ///
    /// let doc = Doc::from_json(
    ///     r#"{"tag":"doc","children":[{"tag":"para","children":[{"tag":"str","text":"Hi"}]}]}"#,
    /// ).unwrap();
    /// assert_eq!(doc.children.len(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve a reference label, preferring explicit definitions.
    #[must_use]
    pub fn reference(&self, label: &str) -> Option<&Reference> {
        self.references
            .get(label)
            .or_else(|| self.auto_references.get(label))
    }
}

/// Reference definition: `[label]: destination`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Reference {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub attributes: Attributes,
}

/// Footnote definition: `[^label]: ...`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Footnote {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// A block or inline node.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum Node {
    // Blocks
    Section(Container),
    Heading(Heading),
    Para(Container),
    ThematicBreak(Leaf),
    Div(Container),
    CodeBlock(CodeBlock),
    RawBlock(Raw),
    Blockquote(Container),
    BulletList(BulletList),
    OrderedList(OrderedList),
    ListItem(Container),
    TaskList(TaskList),
    TaskListItem(TaskListItem),
    DefinitionList(Container),
    DefinitionListItem(Container),
    Term(Container),
    Definition(Container),
    Table(Container),
    Caption(Container),
    Row(Row),
    Cell(Cell),

    // Inlines
    Str(Text),
    SoftBreak(Leaf),
    HardBreak(Leaf),
    NonBreakingSpace(Leaf),
    Symb(Symb),
    Verbatim(Text),
    RawInline(Raw),
    InlineMath(Text),
    DisplayMath(Text),
    Url(Text),
    Email(Text),
    FootnoteReference(Text),
    SmartPunctuation(SmartPunctuation),
    Emph(Container),
    Strong(Container),
    Link(Link),
    Image(Link),
    Span(Container),
    Mark(Container),
    Superscript(Container),
    Subscript(Container),
    Insert(Container),
    Delete(Container),
    DoubleQuoted(Container),
    SingleQuoted(Container),

    /// A tag this crate does not model.
    #[serde(other)]
    Unknown,
}

impl Node {
    /// The node's children; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Section(n)
            | Self::Para(n)
            | Self::Div(n)
            | Self::Blockquote(n)
            | Self::ListItem(n)
            | Self::DefinitionList(n)
            | Self::DefinitionListItem(n)
            | Self::Term(n)
            | Self::Definition(n)
            | Self::Table(n)
            | Self::Caption(n)
            | Self::Emph(n)
            | Self::Strong(n)
            | Self::Span(n)
            | Self::Mark(n)
            | Self::Superscript(n)
            | Self::Subscript(n)
            | Self::Insert(n)
            | Self::Delete(n)
            | Self::DoubleQuoted(n)
            | Self::SingleQuoted(n) => &n.children,
            Self::Heading(n) => &n.children,
            Self::BulletList(n) => &n.children,
            Self::OrderedList(n) => &n.children,
            Self::TaskList(n) => &n.children,
            Self::TaskListItem(n) => &n.children,
            Self::Row(n) => &n.children,
            Self::Cell(n) => &n.children,
            Self::Link(n) | Self::Image(n) => &n.children,
            _ => &[],
        }
    }
}

/// Generic node with attributes and children.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Container {
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Node with attributes only.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Leaf {
    #[serde(default)]
    pub attributes: Attributes,
}

/// Node whose payload is a string.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Text {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Heading {
    pub level: u8,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CodeBlock {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attributes: Attributes,
}

/// Raw content passed through for a specific output format.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Raw {
    pub format: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BulletList {
    /// Marker character: `-`, `*` or `+`.
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub tight: bool,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct OrderedList {
    /// Marker template such as `1.`, `(a)` or `1)`.
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub start: Option<u64>,
    #[serde(default)]
    pub tight: bool,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl OrderedList {
    /// HTML `type` attribute implied by the marker style, if not decimal.
    #[must_use]
    pub fn html_type(&self) -> Option<&'static str> {
        let marker = self.style.trim_matches(|c| matches!(c, '(' | ')' | '.'));
        match marker {
            "a" => Some("a"),
            "A" => Some("A"),
            "i" => Some("i"),
            "I" => Some("I"),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TaskList {
    #[serde(default)]
    pub tight: bool,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Checkbox {
    Checked,
    #[default]
    Unchecked,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TaskListItem {
    #[serde(default)]
    pub checkbox: Checkbox,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub head: bool,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Default,
    Left,
    Right,
    Center,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub head: bool,
    #[serde(default)]
    pub align: Alignment,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Symbol such as `:smile:`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Symb {
    pub alias: String,
    #[serde(default)]
    pub attributes: Attributes,
}

/// Typographic substitution chosen by the parser.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SmartPunctuation {
    /// `left_double_quote`, `em_dash`, `ellipses`, ...
    #[serde(rename = "type")]
    pub kind: String,
    /// Source text the substitution replaced.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attributes: Attributes,
}

impl SmartPunctuation {
    /// The typographic character for this punctuation kind.
    #[must_use]
    pub fn glyph(&self) -> &str {
        match self.kind.as_str() {
            "left_single_quote" => "\u{2018}",
            "right_single_quote" => "\u{2019}",
            "left_double_quote" => "\u{201C}",
            "right_double_quote" => "\u{201D}",
            "ellipses" => "\u{2026}",
            "em_dash" => "\u{2014}",
            "en_dash" => "\u{2013}",
            _ => &self.text,
        }
    }
}

/// Link or image target: either a direct destination or a reference label.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<Node>,
}
