//! `quill render` command implementation.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use quill_config::{CliSettings, Config};
use quill_renderer::{Doc, PlainHighlighter, RenderContext, Renderer};

use super::write_html;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Djot AST in JSON form (`djot -t ast --json`).
    input: PathBuf,

    /// Publish date shown next to the title (YYYY-MM-DD).
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Summary from front matter; suppresses the derived one.
    #[arg(long)]
    summary: Option<String>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Publish date format (overrides config).
    #[arg(long)]
    date_format: Option<String>,

    /// Class for highlighted code lines (overrides config).
    #[arg(long)]
    line_class: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read or
    /// parsed, or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            date_format: self.date_format,
            line_class: self.line_class,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let json = std::fs::read_to_string(&self.input)?;
        let doc = Doc::from_json(&json)?;

        let renderer = Renderer::new()
            .with_highlighter(PlainHighlighter::new(config.highlight.line_class))
            .with_date_format(config.render.date_format);
        let mut ctx = RenderContext {
            date: self.date,
            summary: self.summary,
        };
        let html = renderer.render(&doc, &mut ctx);
        tracing::info!(
            input = %self.input.display(),
            bytes = html.as_str().len(),
            "Rendered document"
        );

        write_html(html.as_str(), self.output.as_deref())?;

        match &ctx.summary {
            Some(summary) => output.info(&format!("Summary: {summary}")),
            None => output.warning("No summary: document has no paragraph"),
        }
        if let Some(path) = &self.output {
            output.success(&format!("Wrote {}", path.display()));
        }

        Ok(())
    }
}
