// ABOUTME: Argument schemas stored on plugin descriptors and checked before handler execution
// ABOUTME: ObjectSchema builder with typed field rules and ordered validation issues
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Argument Schemas
//!
//! The registry stores a schema per plugin for introspection. The orchestrator
//! calls [`ArgumentSchema::validate`] once before invoking the handler.
//!
//! ```rust
//! use serde_json::json;
//! use tutor_tools::plugins::schema::{ArgumentSchema, ObjectSchema, TextRule};
//!
//! let schema = ObjectSchema::new()
//!     .field("query", TextRule::new().trimmed().min_chars(2).max_chars(500))
//!     .optional("type", TextRule::new().one_of(["web", "youtube", "all"]));
//!
//! assert!(schema.validate(&json!({ "query": "fotosintesi" })).is_ok());
//! assert!(schema.validate(&json!({ "query": "a" })).is_err());
//! ```

use std::fmt;

use serde_json::{json, Map, Value};
use tutor_core::errors::ValidationIssue;

/// Validator for handler arguments
pub trait ArgumentSchema: Send + Sync + fmt::Debug {
    /// Check arguments, returning every violation in field order
    ///
    /// # Errors
    ///
    /// Returns the full list of `ValidationIssue`s when any rule fails
    fn validate(&self, args: &Value) -> Result<(), Vec<ValidationIssue>>;

    /// JSON-schema-like description for documentation and tooling
    fn describe(&self) -> Value;
}

/// String constraints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRule {
    min_chars: Option<usize>,
    max_chars: Option<usize>,
    allowed: Vec<String>,
    trimmed: bool,
}

impl TextRule {
    /// Any string
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require at least `n` characters
    #[must_use]
    pub fn min_chars(mut self, n: usize) -> Self {
        self.min_chars = Some(n);
        self
    }

    /// Allow at most `n` characters
    #[must_use]
    pub fn max_chars(mut self, n: usize) -> Self {
        self.max_chars = Some(n);
        self
    }

    /// Restrict to a fixed set of values
    #[must_use]
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = values.into_iter().map(Into::into).collect();
        self
    }

    /// Measure length after trimming surrounding whitespace
    #[must_use]
    pub fn trimmed(mut self) -> Self {
        self.trimmed = true;
        self
    }

    fn check(&self, path: &str, value: &str, issues: &mut Vec<ValidationIssue>) {
        let measured = if self.trimmed { value.trim() } else { value };
        let length = measured.chars().count();

        if let Some(min) = self.min_chars {
            if length < min {
                issues.push(ValidationIssue::new(
                    path,
                    format!("{path} must contain at least {min} character(s)"),
                ));
            }
        }
        if let Some(max) = self.max_chars {
            if length > max {
                issues.push(ValidationIssue::new(
                    path,
                    format!("{path} must contain at most {max} character(s)"),
                ));
            }
        }
        if !self.allowed.is_empty() && !self.allowed.iter().any(|allowed| allowed == measured) {
            issues.push(ValidationIssue::new(
                path,
                format!("{path} must be one of: {}", self.allowed.join(", ")),
            ));
        }
    }

    fn describe(&self) -> Value {
        let mut out = json!({ "type": "string" });
        if let Some(min) = self.min_chars {
            out["minLength"] = json!(min);
        }
        if let Some(max) = self.max_chars {
            out["maxLength"] = json!(max);
        }
        if !self.allowed.is_empty() {
            out["enum"] = json!(self.allowed);
        }
        out
    }
}

/// Inclusive numeric bounds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberRule {
    min: Option<f64>,
    max: Option<f64>,
    integer: bool,
}

impl NumberRule {
    /// Any number
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Any integer
    #[must_use]
    pub fn integer() -> Self {
        Self {
            integer: true,
            ..Self::default()
        }
    }

    /// Inclusive lower bound
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    fn check(&self, path: &str, value: &Value, issues: &mut Vec<ValidationIssue>) {
        let number = if self.integer {
            value.as_i64().map(|n| n as f64)
        } else {
            value.as_f64()
        };
        let Some(number) = number else {
            let expected = if self.integer { "an integer" } else { "a number" };
            issues.push(ValidationIssue::new(path, format!("{path} must be {expected}")));
            return;
        };

        if let Some(min) = self.min {
            if number < min {
                issues.push(ValidationIssue::new(
                    path,
                    format!("{path} must be greater than or equal to {min}"),
                ));
            }
        }
        if let Some(max) = self.max {
            if number > max {
                issues.push(ValidationIssue::new(
                    path,
                    format!("{path} must be less than or equal to {max}"),
                ));
            }
        }
    }

    fn describe(&self) -> Value {
        let kind = if self.integer { "integer" } else { "number" };
        let mut out = json!({ "type": kind });
        if let Some(min) = self.min {
            out["minimum"] = json!(min);
        }
        if let Some(max) = self.max {
            out["maximum"] = json!(max);
        }
        out
    }
}

/// Array constraints with an optional per-item rule
#[derive(Debug, Clone, Default)]
pub struct ListRule {
    min_items: Option<usize>,
    max_items: Option<usize>,
    items: Option<Box<FieldRule>>,
}

impl ListRule {
    /// Any array
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require at least `n` items
    #[must_use]
    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    /// Allow at most `n` items
    #[must_use]
    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    /// Validate every item against a rule
    #[must_use]
    pub fn items(mut self, rule: impl Into<FieldRule>) -> Self {
        self.items = Some(Box::new(rule.into()));
        self
    }

    fn check(&self, path: &str, values: &[Value], issues: &mut Vec<ValidationIssue>) {
        if let Some(min) = self.min_items {
            if values.len() < min {
                issues.push(ValidationIssue::new(
                    path,
                    format!("{path} must contain at least {min} item(s)"),
                ));
            }
        }
        if let Some(max) = self.max_items {
            if values.len() > max {
                issues.push(ValidationIssue::new(
                    path,
                    format!("{path} must contain at most {max} item(s)"),
                ));
            }
        }
        if let Some(rule) = &self.items {
            for (index, item) in values.iter().enumerate() {
                rule.check(&format!("{path}[{index}]"), item, issues);
            }
        }
    }

    fn describe(&self) -> Value {
        let mut out = json!({ "type": "array" });
        if let Some(min) = self.min_items {
            out["minItems"] = json!(min);
        }
        if let Some(max) = self.max_items {
            out["maxItems"] = json!(max);
        }
        if let Some(rule) = &self.items {
            out["items"] = rule.describe();
        }
        out
    }
}

/// Rule applied to a single field
#[derive(Debug, Clone, Default)]
pub enum FieldRule {
    /// String value
    Text(TextRule),
    /// Numeric value
    Number(NumberRule),
    /// Boolean value
    Boolean,
    /// Array value
    List(ListRule),
    /// Nested object
    Object(ObjectSchema),
    /// Anything, including null
    #[default]
    Any,
}

impl FieldRule {
    fn check(&self, path: &str, value: &Value, issues: &mut Vec<ValidationIssue>) {
        match (self, value) {
            (Self::Any, _) | (Self::Boolean, Value::Bool(_)) => {}
            (Self::Text(rule), Value::String(text)) => rule.check(path, text, issues),
            (Self::Number(rule), _) => rule.check(path, value, issues),
            (Self::List(rule), Value::Array(items)) => rule.check(path, items, issues),
            (Self::Object(schema), Value::Object(map)) => schema.check_map(path, map, issues),
            (Self::Text(_), _) => issues.push(type_issue(path, "a string")),
            (Self::Boolean, _) => issues.push(type_issue(path, "a boolean")),
            (Self::List(_), _) => issues.push(type_issue(path, "an array")),
            (Self::Object(_), _) => issues.push(type_issue(path, "an object")),
        }
    }

    fn describe(&self) -> Value {
        match self {
            Self::Text(rule) => rule.describe(),
            Self::Number(rule) => rule.describe(),
            Self::Boolean => json!({ "type": "boolean" }),
            Self::List(rule) => rule.describe(),
            Self::Object(schema) => schema.describe(),
            Self::Any => json!({}),
        }
    }
}

impl From<TextRule> for FieldRule {
    fn from(rule: TextRule) -> Self {
        Self::Text(rule)
    }
}

impl From<NumberRule> for FieldRule {
    fn from(rule: NumberRule) -> Self {
        Self::Number(rule)
    }
}

impl From<ListRule> for FieldRule {
    fn from(rule: ListRule) -> Self {
        Self::List(rule)
    }
}

impl From<ObjectSchema> for FieldRule {
    fn from(schema: ObjectSchema) -> Self {
        Self::Object(schema)
    }
}

fn type_issue(path: &str, expected: &str) -> ValidationIssue {
    let subject = if path.is_empty() { "arguments" } else { path };
    ValidationIssue::new(path, format!("{subject} must be {expected}"))
}

fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_owned()
    } else {
        format!("{parent}.{field}")
    }
}

#[derive(Debug, Clone)]
struct FieldSpec {
    name: String,
    required: bool,
    rule: FieldRule,
}

/// Schema for an object of named fields.
///
/// Fields are checked in declaration order, so the first reported issue is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<FieldSpec>,
    deny_unknown: bool,
}

impl ObjectSchema {
    /// An object schema with no declared fields
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required field
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, rule: impl Into<FieldRule>) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            required: true,
            rule: rule.into(),
        });
        self
    }

    /// Declare an optional field (absent or null is accepted)
    #[must_use]
    pub fn optional(mut self, name: impl Into<String>, rule: impl Into<FieldRule>) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            required: false,
            rule: rule.into(),
        });
        self
    }

    /// Declare a required boolean field
    #[must_use]
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.field(name, FieldRule::Boolean)
    }

    /// Reject fields that were not declared
    #[must_use]
    pub fn deny_unknown_fields(mut self) -> Self {
        self.deny_unknown = true;
        self
    }

    /// Names of the declared fields
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|spec| spec.name.as_str()).collect()
    }

    fn check_map(&self, parent: &str, map: &Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
        for spec in &self.fields {
            let path = join_path(parent, &spec.name);
            match map.get(&spec.name) {
                None | Some(Value::Null) if spec.required => {
                    issues.push(ValidationIssue::new(&path, format!("{path} is required")));
                }
                None | Some(Value::Null) => {}
                Some(value) => spec.rule.check(&path, value, issues),
            }
        }

        if self.deny_unknown {
            for key in map.keys() {
                if !self.fields.iter().any(|spec| &spec.name == key) {
                    let path = join_path(parent, key);
                    issues.push(ValidationIssue::new(
                        &path,
                        format!("{path} is not an allowed field"),
                    ));
                }
            }
        }
    }
}

impl ArgumentSchema for ObjectSchema {
    fn validate(&self, args: &Value) -> Result<(), Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        match args {
            Value::Object(map) => self.check_map("", map, &mut issues),
            // Handlers without declared fields are commonly called with no arguments
            Value::Null if self.fields.iter().all(|spec| !spec.required) => {}
            _ => issues.push(type_issue("", "an object")),
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    fn describe(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|spec| (spec.name.clone(), spec.rule.describe()))
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.name.as_str())
            .collect();

        let mut out = json!({
            "type": "object",
            "properties": properties,
            "required": required,
        });
        if self.deny_unknown {
            out["additionalProperties"] = Value::Bool(false);
        }
        out
    }
}
