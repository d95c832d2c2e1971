//! `stencil render`: fill a template with a context file and emit HTML.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;

use stencil_core::{io::load_context, Context};
use stencil_renderer::{load_template, render, TemplateEngine};

use super::{resolve_template_dir, TEMPLATE_DIR_ENV};

/// Arguments for `stencil render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template file, or a registered template name with `--builtin`.
    pub template: String,

    /// Context document (`.json`, `.yaml` or `.yml`). Defaults to an empty context.
    #[arg(long, short = 'c')]
    pub context: Option<PathBuf>,

    /// Write the rendered document here instead of stdout.
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Look TEMPLATE up by name among built-in and user templates.
    #[arg(long)]
    pub builtin: bool,

    /// Directory of user `.html` templates that extend or override the built-ins.
    #[arg(long, env = TEMPLATE_DIR_ENV)]
    pub template_dir: Option<PathBuf>,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let context = match &self.context {
            Some(path) => load_context(path)
                .with_context(|| format!("failed to load context from {}", path.display()))?,
            None => Context::new(),
        };

        let html = if self.builtin {
            let dir = resolve_template_dir(self.template_dir);
            let engine =
                TemplateEngine::new(dir.as_deref()).context("failed to load user templates")?;
            engine
                .render(&self.template, &context)
                .with_context(|| format!("failed to render '{}'", self.template))?
        } else {
            let source = load_template(Path::new(&self.template))
                .with_context(|| format!("failed to read template {}", self.template))?;
            render(&source, &context)
        };

        match self.out {
            Some(path) => {
                write_output(&path, &html)?;
                println!("{} {}", "wrote".green().bold(), path.display());
            }
            None => print!("{html}"),
        }
        Ok(())
    }
}

fn write_output(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))
}
