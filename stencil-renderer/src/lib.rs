//! # stencil-renderer
//!
//! Template engine that substitutes business data into HTML templates ahead
//! of HTML→PDF conversion. Supports `{{name}}` substitution, `{{#if key}}`
//! conditionals (arbitrarily nested) and `{{#each list}}` iteration.
//!
//! ## Usage
//!
//! ```rust
//! use stencil_core::{Context, Item};
//! use stencil_renderer::render;
//!
//! let mut ctx = Context::new();
//! ctx.set("title", "Report")
//!     .push_item("rows", Item::from_iter([("col", "A")]))
//!     .push_item("rows", Item::from_iter([("col", "B")]));
//!
//! let html = render(
//!     "<h1>{{title}}</h1>{{#each rows}}<p>{{col}}</p>{{/each}}{{missing}}",
//!     &ctx,
//! );
//! assert_eq!(html, "<h1>Report</h1><p>A</p><p>B</p>");
//! ```

pub mod engine;
pub mod error;
pub mod passes;
pub mod registry;
pub mod syntax;

pub use engine::{render, Template, TemplateEngine, TemplateOrigin};
pub use error::RenderError;
pub use passes::{expand_lists, resolve_conditionals, sanitize, substitute, substitute_all};
pub use registry::load_template;
