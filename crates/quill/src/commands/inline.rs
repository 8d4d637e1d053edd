//! `quill inline` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_renderer::RenderContext;
use quill_renderer::view::Tree;

use super::write_html;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the inline command.
#[derive(Args)]
pub(crate) struct InlineArgs {
    /// Inline span tree in JSON form.
    input: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl InlineArgs {
    /// Execute the inline command.
    ///
    /// Nodes that fail to render are replaced by inline diagnostics, so this
    /// only fails on I/O or malformed JSON.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let json = std::fs::read_to_string(&self.input)?;
        let tree = Tree::from_json(&json)?;
        let ctx = RenderContext::new();
        let html = tree.root(&ctx).render();
        tracing::info!(
            input = %self.input.display(),
            nodes = tree.node_count(),
            "Rendered inline tree"
        );

        write_html(html.as_str(), self.output.as_deref())?;

        if let Some(path) = &self.output {
            output.success(&format!("Wrote {}", path.display()));
        }

        Ok(())
    }
}
