//! Render pipeline: [`Template`], [`render`] and the named-template
//! [`TemplateEngine`].
//!
//! Observable order of a render:
//!
//! 1. `{{#if}}` blocks resolve against the global variables, including those
//!    inside `{{#each}}` bodies;
//! 2. `{{#each}}` blocks expand once per item, substituting placeholders
//!    against that item's fields only;
//! 3. remaining `{{name}}` tags take global variable values;
//! 4. placeholders nobody defined are removed.
//!
//! All four happen in one walk over the block tree, so substituted values are
//! never re-read as template syntax.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use stencil_core::Context;

use crate::error::RenderError;
use crate::passes::{write_nodes, Conditions, Output, Unresolved};
use crate::registry;
use crate::syntax::{parse, tokenize, Node, Syntax};

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// A parsed template, borrowing its source. Parse once, render many contexts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    source: &'a str,
    nodes: Vec<Node<'a>>,
}

impl<'a> Template<'a> {
    pub fn parse(source: &'a str) -> Self {
        let tokens = tokenize(source);
        Self {
            source,
            nodes: parse(&tokens, Syntax::FULL),
        }
    }

    /// Render against `context`. Never fails; missing data renders as nothing.
    pub fn render(&self, context: &Context) -> String {
        let mut out = Output::new(self.source.len(), Unresolved::Drop);
        write_nodes(&mut out, &self.nodes, context, Conditions::Fixed(context));
        let out = out.finish();
        tracing::debug!(
            template_len = self.source.len(),
            output_len = out.len(),
            variables = context.variables.len(),
            lists = context.lists.len(),
            "rendered template"
        );
        out
    }
}

/// Render `template` against `context` in one call.
pub fn render(template: &str, context: &Context) -> String {
    Template::parse(template).render(context)
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Where a registered template came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// Compiled into the binary.
    Builtin,
    /// A user template registered under a built-in name.
    Override,
    /// A user template with a name of its own.
    User,
}

impl TemplateOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Builtin => "built-in",
            Self::Override => "override",
            Self::User => "user",
        }
    }
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
struct Registered {
    source: String,
    origin: TemplateOrigin,
}

/// Named-template renderer: built-in templates plus optional user overrides.
///
/// `user_template_dir` may contain `.html` files that override or extend the
/// built-ins. Names are relative paths without extension, lowercased, with `/`
/// separators (`statements/Monthly.html` → `statements/monthly`).
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    templates: BTreeMap<String, Registered>,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`], loading built-in templates plus any
    /// overrides found in `user_template_dir`.
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let mut engine = Self::builtin();
        if let Some(dir) = user_template_dir {
            for (name, source) in registry::load_user_templates(dir)? {
                let origin = if registry::builtin(&name).is_some() {
                    tracing::warn!(template = %name, dir = %dir.display(), "user template overrides built-in");
                    TemplateOrigin::Override
                } else {
                    TemplateOrigin::User
                };
                engine.templates.insert(name, Registered { source, origin });
            }
        }
        Ok(engine)
    }

    /// Engine with the built-in templates only.
    pub fn builtin() -> Self {
        let templates = registry::builtin_templates()
            .into_iter()
            .map(|(name, source)| {
                let registered = Registered {
                    source,
                    origin: TemplateOrigin::Builtin,
                };
                (name, registered)
            })
            .collect();
        Self { templates }
    }

    /// Registered template names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn source(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(|t| t.source.as_str())
    }

    pub fn origin(&self, name: &str) -> Option<TemplateOrigin> {
        self.templates.get(name).map(|t| t.origin)
    }

    /// Render the template registered as `name`.
    pub fn render(&self, name: &str, context: &Context) -> Result<String, RenderError> {
        let source = self
            .source(name)
            .ok_or_else(|| RenderError::UnknownTemplate {
                name: name.to_string(),
            })?;
        Ok(render(source, context))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
