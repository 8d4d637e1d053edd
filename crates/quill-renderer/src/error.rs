//! Error types for parsing and rendering.

/// Error returned when a document tree cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Input is not a valid djot JSON AST.
    #[error("Invalid djot AST: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error raised while rendering a document.
///
/// Never escapes [`Renderer::render`](crate::Renderer::render): it is caught at
/// the document boundary and turned into a visible error fragment.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Node kind the renderer has no rules for.
    #[error("unsupported node kind")]
    UnsupportedNode,
    /// Malformed `highlight` attribute on a code block.
    #[error("invalid highlight spec `{spec}`: {reason}")]
    HighlightSpec {
        /// The attribute value as written.
        spec: String,
        /// What is wrong with it.
        reason: String,
    },
    /// Writing to the output buffer failed (e.g. an invalid date format).
    #[error("formatting failed")]
    Fmt(#[from] std::fmt::Error),
}

/// Error raised by the inline view layer.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// Tag with neither a substitution nor a handler.
    #[error("unhandled node `{0}`")]
    UnhandledTag(String),
    /// `span` whose classes match no known convention.
    #[error("unknown span class `{0}`")]
    UnknownSpanClass(String),
    /// Image `reference` missing from the references table.
    #[error("unknown reference `{0}`")]
    UnknownReference(String),
    /// Image with neither `destination` nor `reference`.
    #[error("image has no source")]
    MissingSource,
    /// Context replaced on a node that is not the root.
    #[error("with_context called on a non-root node")]
    NotRoot,
}
