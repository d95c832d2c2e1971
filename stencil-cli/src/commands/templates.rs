//! `stencil templates`: list templates available to `render --builtin`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use stencil_renderer::TemplateEngine;

use super::{resolve_template_dir, TEMPLATE_DIR_ENV};

/// Arguments for `stencil templates`.
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Directory of user `.html` templates that extend or override the built-ins.
    #[arg(long, env = TEMPLATE_DIR_ENV)]
    pub template_dir: Option<PathBuf>,

    /// Print machine-readable JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct TemplateRow {
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "origin")]
    origin: &'static str,
    #[tabled(rename = "bytes")]
    bytes: usize,
}

impl TemplatesArgs {
    pub fn run(self) -> Result<()> {
        let dir = resolve_template_dir(self.template_dir);
        let engine =
            TemplateEngine::new(dir.as_deref()).context("failed to load user templates")?;

        let rows: Vec<TemplateRow> = engine
            .names()
            .filter_map(|name| {
                let source = engine.source(name)?;
                let origin = engine.origin(name)?;
                Some(TemplateRow {
                    name: name.to_string(),
                    origin: origin.as_str(),
                    bytes: source.len(),
                })
            })
            .collect();

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).context("failed to serialize template list")?
            );
            return Ok(());
        }

        match &dir {
            Some(dir) => println!("{} {}", "user templates:".bold(), dir.display()),
            None => println!("{}", "built-in templates only".bold()),
        }
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
