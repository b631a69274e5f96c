// ABOUTME: Safe `{name}` template substitution over an explicit allow-listed variable map
// ABOUTME: Unknown and reserved tokens are left verbatim; only scalar JSON values are resolvable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Template Substitution
//!
//! Templates contain `{name}` tokens where `name` is one or more word
//! characters. A token resolves only when its name was explicitly inserted
//! into a [`TemplateVars`] map. Names such as `__proto__` or `constructor`
//! can never be inserted, so they always stay verbatim.
//!
//! ```rust
//! use tutor_tools::voice::template::{render, TemplateVars};
//!
//! let mut vars = TemplateVars::new();
//! vars.insert("topic", "frazioni");
//!
//! assert_eq!(render("Parliamo di {topic}", &vars), "Parliamo di frazioni");
//! assert_eq!(render("Ciao {nome}", &vars), "Ciao {nome}");
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};
use tutor_core::constants::voice::RESERVED_VARIABLE_NAMES;

/// Matches `{name}` tokens
static TOKEN_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\{(\w+)\}").ok());

/// Check whether a variable name may never be resolved
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    name.starts_with("__") || RESERVED_VARIABLE_NAMES.contains(&name)
}

/// Render a JSON value as template text, if it is a scalar
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Allow-listed variables available to a template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    values: HashMap<String, String>,
}

impl TemplateVars {
    /// Create an empty variable map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a variable.
    ///
    /// Returns `false` (and stores nothing) for reserved names.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if is_reserved(&name) {
            return false;
        }
        self.values.insert(name, value.into());
        true
    }

    /// Insert a variable only if it is not already present
    pub fn insert_default(&mut self, name: &str, value: &str) {
        if !self.values.contains_key(name) {
            self.insert(name, value);
        }
    }

    /// Insert a JSON value if it is a scalar; returns whether it was stored
    pub fn insert_json(&mut self, name: &str, value: &Value) -> bool {
        scalar_text(value).is_some_and(|text| self.insert(name, text))
    }

    /// Insert every scalar field of a JSON object
    pub fn extend_from_object(&mut self, object: &Map<String, Value>) {
        for (name, value) in object {
            self.insert_json(name, value);
        }
    }

    /// Look up a variable
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Number of variables
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no variables are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Substitute every known `{name}` token in `template`
#[must_use]
pub fn render(template: &str, vars: &TemplateVars) -> String {
    let Some(pattern) = TOKEN_PATTERN.as_ref() else {
        return template.to_owned();
    };

    pattern
        .replace_all(template, |caps: &Captures<'_>| {
            let token = caps.get(0).map_or("", |m| m.as_str());
            caps.get(1)
                .and_then(|name| vars.get(name.as_str()))
                .unwrap_or(token)
                .to_owned()
        })
        .into_owned()
}
