//! quill CLI - djot blog renderer.
//!
//! Provides commands for:
//! - `render`: Render a djot document AST to HTML
//! - `inline`: Render an inline span tree through the view layer

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{InlineArgs, RenderArgs};
use output::Output;

/// quill - djot blog renderer.
#[derive(Parser)]
#[command(name = "quill", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document to HTML.
    Render(RenderArgs),
    /// Render an inline span tree to HTML.
    Inline(InlineArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::Inline(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Inline(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_args() {
        let cli = Cli::try_parse_from([
            "quill",
            "render",
            "post.json",
            "--date",
            "2024-01-02",
            "-v",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Render(args) if args.verbose));
    }

    #[test]
    fn test_parse_render_rejects_bad_date() {
        assert!(Cli::try_parse_from(["quill", "render", "post.json", "--date", "yesterday"]).is_err());
    }
}
