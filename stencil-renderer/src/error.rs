//! Error types for stencil-renderer.
//!
//! Rendering itself cannot fail; these cover template lookup and loading.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while locating or loading templates.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Filesystem error while loading a template file or directory.
    #[error("template io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No built-in or user template is registered under this name.
    #[error("unknown template '{name}'")]
    UnknownTemplate { name: String },
}
