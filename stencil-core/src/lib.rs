//! Stencil core library: the render context model and context files.
//!
//! Public API surface:
//! - [`types`]: [`Context`], [`Item`], the [`Scope`] lookup seam and truthiness
//! - [`io`]: loading contexts from JSON / YAML documents
//! - [`error`]: [`ContextError`]

pub mod error;
pub mod io;
pub mod types;

pub use error::ContextError;
pub use types::{is_truthy, Context, Item, Scope};
