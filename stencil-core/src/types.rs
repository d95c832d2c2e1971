//! Render context model: global variables plus named lists of items.
//!
//! Every value is a string. Numbers, dates, colors and localisation are
//! formatted by the caller before they enter a [`Context`]; the engine only
//! ever compares string identity.
//!
//! A context serializes as
//!
//! ```json
//! { "variables": { "title": "Report" }, "lists": { "rows": [ { "col": "A" } ] } }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// String values that make a conditional false, besides absence.
const FALSY: &[&str] = &["", "0", "false"];

/// Truthiness of a looked-up value.
///
/// `Some(v)` is true unless `v` is exactly `""`, `"0"` or `"false"`; `None` is
/// false. Any other string, including `"no"` or `"False"`, is true.
pub fn is_truthy(value: Option<&str>) -> bool {
    matches!(value, Some(v) if !FALSY.contains(&v))
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Name resolution for one level of a render.
///
/// The global scope is a [`Context`]; inside an `{{#each}}` block the scope is
/// the current [`Item`], which sees its own fields and no lists.
pub trait Scope {
    /// Value bound to `key`, if any.
    fn lookup(&self, key: &str) -> Option<&str>;

    /// Items of the list named `name`, if any.
    fn items(&self, _name: &str) -> Option<&[Item]> {
        None
    }
}

impl Scope for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// A bare list table: no variables, only lists.
impl Scope for BTreeMap<String, Vec<Item>> {
    fn lookup(&self, _key: &str) -> Option<&str> {
        None
    }

    fn items(&self, name: &str) -> Option<&[Item]> {
        self.get(name).map(Vec::as_slice)
    }
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// One element of a named list: a flat bag of string fields.
///
/// Serializes transparently as a JSON/YAML object of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    pub fields: BTreeMap<String, String>,
}

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite a field.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Item {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Scope for Item {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.field(key)
    }
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Render-time data: global variables plus named, ordered lists of items.
///
/// Built once per document (or page), passed by reference into a render and
/// dropped afterwards. Rendering never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    #[serde(default)]
    pub lists: BTreeMap<String, Vec<Item>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite a global variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Append an item to the list `name`, creating the list on first use.
    pub fn push_item(&mut self, name: impl Into<String>, item: Item) -> &mut Self {
        self.lists.entry(name.into()).or_default().push(item);
        self
    }

    /// Declare `name` as an (initially empty) list.
    pub fn with_list(&mut self, name: impl Into<String>) -> &mut Self {
        self.lists.entry(name.into()).or_default();
        self
    }

    pub fn variable(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn list(&self, name: &str) -> Option<&[Item]> {
        self.lists.get(name).map(Vec::as_slice)
    }
}

impl Scope for Context {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.variable(key)
    }

    fn items(&self, name: &str) -> Option<&[Item]> {
        self.list(name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
