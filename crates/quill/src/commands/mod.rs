//! CLI command implementations.

pub(crate) mod inline;
pub(crate) mod render;

pub(crate) use inline::InlineArgs;
pub(crate) use render::RenderArgs;

use std::io::Write;
use std::path::Path;

use crate::error::CliError;

/// Write rendered HTML to `path`, or to stdout when no path is given.
fn write_html(html: &str, path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, html)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
