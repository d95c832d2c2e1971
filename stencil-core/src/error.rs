//! Error types for stencil-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading a context document.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error; includes file path and line context from serde_json.
    #[error("failed to parse JSON context at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parse error; includes file path and line context from serde_yaml.
    #[error("failed to parse YAML context at {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The file extension is neither `.json` nor `.yaml` / `.yml`.
    #[error("unsupported context format at {path}; expected .json, .yaml or .yml")]
    UnsupportedFormat { path: PathBuf },
}
