//! Built-in template table and template loading from disk.
//!
//! | Name                | Document                                   |
//! |---------------------|--------------------------------------------|
//! | `invoice`           | invoice / credit note / order, paginated   |
//! | `report`            | tabular report with summary and conclusion |
//! | `letter`            | letterhead correspondence                  |
//! | `sales_summary`     | point-of-sale day or shift summary         |
//! | `purchase_summary`  | purchases by category, payment, supplier   |
//! | `poison_order`      | controlled-substance order form            |
//! | `billing_statement` | per-debtor billing statement               |
//! | `purchase_order`    | purchase order to a supplier               |

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Built-in templates, baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("invoice", include_str!("templates/invoice.html")),
    ("report", include_str!("templates/report.html")),
    ("letter", include_str!("templates/letter.html")),
    ("sales_summary", include_str!("templates/sales_summary.html")),
    (
        "purchase_summary",
        include_str!("templates/purchase_summary.html"),
    ),
    ("poison_order", include_str!("templates/poison_order.html")),
    (
        "billing_statement",
        include_str!("templates/billing_statement.html"),
    ),
    ("purchase_order", include_str!("templates/purchase_order.html")),
];

/// File extensions picked up from a user template directory.
const TEMPLATE_EXTENSIONS: &[&str] = &["html", "htm"];

pub(crate) fn builtin_templates() -> BTreeMap<String, String> {
    TPLS.iter()
        .map(|(name, content)| ((*name).to_string(), (*content).to_string()))
        .collect()
}

/// Source of a built-in template.
pub fn builtin(name: &str) -> Option<&'static str> {
    TPLS.iter()
        .find(|(builtin_name, _)| *builtin_name == name)
        .map(|(_, content)| *content)
}

// ---------------------------------------------------------------------------
// Loading from disk
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.into(),
        source,
    }
}

/// Read a template file. An empty file is a valid, empty template.
pub fn load_template(path: &Path) -> Result<String, RenderError> {
    std::fs::read_to_string(path).map_err(|e| io_err(path, e))
}

fn normalize_template_name(rel: &Path) -> String {
    rel.with_extension("")
        .to_string_lossy()
        .replace('\\', "/")
        .to_lowercase()
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn is_template_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            TEMPLATE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Load every `.html` / `.htm` file under `dir`, keyed by normalised name.
///
/// A missing directory yields no templates.
pub fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    files.sort();

    let mut templates = Vec::new();
    for path in files {
        if !is_template_file(&path) {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = load_template(&path)?;
        tracing::debug!(template = %name, path = %path.display(), "loaded user template");
        templates.push((name, contents));
    }
    Ok(templates)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
