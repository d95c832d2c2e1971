//! Stencil: render HTML document templates from JSON or YAML context files.
//!
//! # Usage
//!
//! ```text
//! stencil render <template.html> [--context <file>] [--out <file>]
//! stencil render <name> --builtin [--context <file>] [--template-dir <dir>]
//! stencil templates [--template-dir <dir>] [--json]
//! ```
//!
//! Diagnostics go to stderr and are controlled with `RUST_LOG`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{render::RenderArgs, templates::TemplatesArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "stencil",
    version,
    about = "Render placeholder, conditional and list templates into HTML documents",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a template file or a registered template against a context file.
    Render(RenderArgs),

    /// List the built-in and user templates available by name.
    Templates(TemplatesArgs),
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => args.run(),
        Commands::Templates(args) => args.run(),
    }
}
