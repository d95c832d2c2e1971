//! Loading a [`Context`] from a JSON or YAML document.
//!
//! The document shape is the serde form of [`Context`]: an object with optional
//! `variables` (string → string) and `lists` (string → array of flat string
//! objects). Values must already be strings.

use std::path::{Path, PathBuf};

use crate::error::ContextError;
use crate::types::Context;

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ContextError {
    ContextError::Io {
        path: path.into(),
        source,
    }
}

/// Parse a context from JSON text.
pub fn parse_context_json(text: &str) -> Result<Context, serde_json::Error> {
    serde_json::from_str(text)
}

/// Parse a context from YAML text.
pub fn parse_context_yaml(text: &str) -> Result<Context, serde_yaml::Error> {
    serde_yaml::from_str(text)
}

/// Load a context document, choosing the format from the file extension.
pub fn load_context(path: &Path) -> Result<Context, ContextError> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("json") => {
            let text = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
            parse_context_json(&text).map_err(|source| ContextError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
        Some("yaml" | "yml") => {
            let text = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
            parse_context_yaml(&text).map_err(|source| ContextError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => Err(ContextError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
