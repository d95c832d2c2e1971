pub mod render;
pub mod templates;

use std::path::PathBuf;

/// Environment variable naming the user template directory.
pub const TEMPLATE_DIR_ENV: &str = "STENCIL_TEMPLATE_DIR";

/// Location under the home directory searched when no directory is given.
const DEFAULT_TEMPLATE_DIR: &str = ".stencil/templates";

/// Pick the user template directory: the explicit flag (or env var, filled
/// in by clap), else `~/.stencil/templates` when it exists.
pub fn resolve_template_dir(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_TEMPLATE_DIR))
            .filter(|dir| dir.is_dir())
    })
}
