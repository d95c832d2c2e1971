//! The individual text passes: conditional resolution, list expansion,
//! variable substitution and sanitization.
//!
//! Each pass parses its input with only its own constructs live and leaves
//! everything else byte-for-byte as it was, so passes can be applied on their
//! own or chained. [`crate::render`] performs all of them in a single walk of
//! one block tree.

use std::collections::BTreeMap;

use stencil_core::{is_truthy, Item, Scope};

use crate::syntax::{parse, tokenize, Node, Syntax, CLOSE, OPEN};

/// What to emit for a variable the active scope does not define.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unresolved {
    /// Leave the `{{name}}` tag for a later pass.
    Keep,
    /// Remove it, along with any stray placeholder text it closes.
    Drop,
}

/// Where `{{#if}}` keys are looked up.
#[derive(Clone, Copy)]
pub(crate) enum Conditions<'s> {
    /// The scope in effect at the block: item fields inside `{{#each}}`.
    Current,
    /// One scope everywhere, list bodies included.
    Fixed(&'s dyn Scope),
}

/// Render output buffer.
///
/// In [`Unresolved::Drop`] mode every stretch of template text between two
/// inserted values is passed through [`sanitize`] before the next value goes
/// in, so placeholder removal never reaches into a value.
pub(crate) struct Output {
    buf: String,
    run_start: usize,
    unresolved: Unresolved,
}

impl Output {
    pub(crate) fn new(capacity: usize, unresolved: Unresolved) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            run_start: 0,
            unresolved,
        }
    }

    fn text(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    fn value(&mut self, value: &str) {
        self.flush();
        self.buf.push_str(value);
        self.run_start = self.buf.len();
    }

    fn flush(&mut self) {
        if self.unresolved == Unresolved::Keep || !self.buf[self.run_start..].contains(OPEN) {
            return;
        }
        let cleaned = sanitize(&self.buf[self.run_start..]);
        self.buf.truncate(self.run_start);
        self.buf.push_str(&cleaned);
    }

    pub(crate) fn finish(mut self) -> String {
        self.flush();
        self.buf
    }
}

/// Walk `nodes` against `scope`, appending to `out`.
pub(crate) fn write_nodes(
    out: &mut Output,
    nodes: &[Node<'_>],
    scope: &dyn Scope,
    conditions: Conditions<'_>,
) {
    for node in nodes {
        match node {
            Node::Text(text) => out.text(text),
            Node::Variable { name, raw } => match scope.lookup(name) {
                Some(value) => out.value(value),
                // Dropped tags are removed by the next flush.
                None => out.text(raw),
            },
            Node::If { key, body } => {
                let value = match conditions {
                    Conditions::Current => scope.lookup(key),
                    Conditions::Fixed(fixed) => fixed.lookup(key),
                };
                if is_truthy(value) {
                    write_nodes(out, body, scope, conditions);
                }
            }
            Node::Each { list, body } => {
                for item in scope.items(list).unwrap_or_default() {
                    write_nodes(out, body, item, conditions);
                }
            }
        }
    }
}

fn run(input: &str, syntax: Syntax, scope: &dyn Scope) -> String {
    if !input.contains(OPEN) {
        return input.to_owned();
    }
    let tokens = tokenize(input);
    let nodes = parse(&tokens, syntax);
    let mut out = Output::new(input.len(), Unresolved::Keep);
    write_nodes(&mut out, &nodes, scope, Conditions::Current);
    out.finish()
}

/// Resolve every `{{#if key}} … {{/if}}` block against `vars`.
///
/// A block is replaced by its body when `key` is truthy and by nothing
/// otherwise; nested blocks resolve innermost first. Blocks inside
/// `{{#each}}` bodies are resolved too, against `vars`. Variables and list
/// tags are left untouched, and an opener without a closer stays in place.
pub fn resolve_conditionals(input: &str, vars: &dyn Scope) -> String {
    run(input, Syntax::CONDITIONALS, vars)
}

/// Expand every `{{#each list}} … {{/each}}` block.
///
/// The body is rendered once per item, in list order: conditionals still in
/// the body are resolved and `{{field}}` tags substituted against that item's
/// fields only. Placeholders the item does not define are left for
/// [`sanitize`]. A missing or empty list expands to nothing. Text outside list
/// blocks is untouched.
pub fn expand_lists(input: &str, lists: &BTreeMap<String, Vec<Item>>) -> String {
    run(input, Syntax::LISTS, lists)
}

/// Replace every literal `{{key}}` in `input` with `value`, left to right,
/// non-overlapping.
pub fn substitute(input: &str, key: &str, value: &str) -> String {
    input.replace(&format!("{OPEN}{key}{CLOSE}"), value)
}

/// Substitute every variable of `vars` in one pass.
///
/// Inserted values are never scanned again, so a value that itself contains
/// `{{other}}` comes through verbatim regardless of key order.
pub fn substitute_all(input: &str, vars: &dyn Scope) -> String {
    run(input, Syntax::VARIABLES, vars)
}

/// Remove every remaining `{{…}}` placeholder.
///
/// A placeholder runs from a `{{` to the next `}}`. A `{{` directly followed
/// by `#` or `/` is kept, so unterminated or unknown directives remain
/// visible, and a `{{` with no `}}` after it is kept along with the rest of
/// the input.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        if after.starts_with(['#', '/']) {
            out.push_str(OPEN);
            rest = after;
            continue;
        }
        match after.find(CLOSE) {
            Some(end) => rest = &after[end + CLOSE.len()..],
            None => {
                rest = &rest[start..];
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
