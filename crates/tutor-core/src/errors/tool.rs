// ABOUTME: Execution-time error types returned inside tool results
// ABOUTME: Closed error-code taxonomy with user-facing messages and diagnostic details
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Tool Error Types
//!
//! Execution failures are values, never panics or raised errors. A `ToolError`
//! carries:
//! - `code` - one of the closed `ToolErrorCode` variants
//! - `message` - a safe, user-facing description
//! - `details` - optional diagnostics (validation issues, missing permissions)

use std::error::Error;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::execution::GENERIC_FAILURE_MESSAGE;

/// Closed set of execution error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolErrorCode {
    /// No plugin is registered under the requested id
    PluginNotFound,
    /// Arguments did not satisfy the plugin schema
    ValidationFailed,
    /// Caller context does not allow this plugin to run now
    PrerequisitesNotMet,
    /// Caller lacks a permission the plugin declares
    PermissionDenied,
    /// Handler failed while executing its domain logic
    ExecutionFailed,
    /// Handler did not finish within the configured deadline
    Timeout,
    /// Anything not covered above
    Unknown,
}

impl ToolErrorCode {
    /// Wire representation of the code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PluginNotFound => "PLUGIN_NOT_FOUND",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::PrerequisitesNotMet => "PREREQUISITES_NOT_MET",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::ExecutionFailed => "EXECUTION_FAILED",
            Self::Timeout => "TIMEOUT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ToolErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path of the offending argument (empty for the root)
    pub path: String,
    /// Human-readable description of the violation
    pub message: String,
}

impl ValidationIssue {
    /// Create a validation issue
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Diagnostic payload attached to a `ToolError`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Every schema violation, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<ValidationIssue>,
    /// Free-form diagnostic fields
    #[serde(flatten)]
    pub context: Map<String, Value>,
}

impl ErrorDetails {
    /// Check whether the details carry any information
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validation_errors.is_empty() && self.context.is_empty()
    }
}

/// Error returned by plugin execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error classification
    pub code: ToolErrorCode,
    /// User-facing message
    pub message: String,
    /// Optional diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

impl ToolError {
    /// Create an error with an explicit code
    #[must_use]
    pub fn new(code: ToolErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a "plugin not found" error
    #[must_use]
    pub fn plugin_not_found(plugin_id: &str) -> Self {
        Self::new(
            ToolErrorCode::PluginNotFound,
            format!("Tool '{plugin_id}' not found"),
        )
    }

    /// Create a validation error from the full issue list.
    ///
    /// The message is the first issue's description.
    #[must_use]
    pub fn validation_failed(issues: Vec<ValidationIssue>) -> Self {
        let message = issues
            .first()
            .map_or_else(|| "Invalid arguments".to_owned(), |issue| issue.message.clone());
        Self {
            code: ToolErrorCode::ValidationFailed,
            message,
            details: Some(ErrorDetails {
                validation_errors: issues,
                context: Map::new(),
            }),
        }
    }

    /// Create a "prerequisites not met" error
    #[must_use]
    pub fn prerequisites_not_met(plugin_id: &str) -> Self {
        Self::new(
            ToolErrorCode::PrerequisitesNotMet,
            format!("Prerequisites not met for tool '{plugin_id}'"),
        )
    }

    /// Create a "permission denied" error listing what is missing
    #[must_use]
    pub fn permission_denied(plugin_id: &str, missing: &[&str]) -> Self {
        let listed = missing.iter().map(|name| Value::from(*name)).collect();
        Self::new(
            ToolErrorCode::PermissionDenied,
            format!("Insufficient permissions for tool '{plugin_id}'"),
        )
        .with_context("missingPermissions", Value::Array(listed))
    }

    /// Create an "execution failed" error with a caller-supplied message
    #[must_use]
    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new(ToolErrorCode::ExecutionFailed, message)
    }

    /// Create an "execution failed" error from any error value.
    ///
    /// Uses the error's `Display` text, or the generic message when that is blank.
    #[must_use]
    pub fn from_error(error: &dyn Error) -> Self {
        let message = error.to_string();
        if message.trim().is_empty() {
            Self::execution_failed(GENERIC_FAILURE_MESSAGE)
        } else {
            Self::execution_failed(message)
        }
    }

    /// Create a "timeout" error
    #[must_use]
    pub fn timeout(plugin_id: &str, limit: Duration) -> Self {
        Self::new(
            ToolErrorCode::Timeout,
            format!(
                "Tool '{plugin_id}' did not complete within {}ms",
                limit.as_millis()
            ),
        )
    }

    /// Create an "unknown" error
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ToolErrorCode::Unknown, message)
    }

    /// Attach a diagnostic field
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(ErrorDetails::default)
            .context
            .insert(key.into(), value.into());
        self
    }

    /// Validation issues carried in the details (empty when none)
    #[must_use]
    pub fn validation_errors(&self) -> &[ValidationIssue] {
        self.details
            .as_ref()
            .map_or(&[], |details| details.validation_errors.as_slice())
    }

    /// Look up a diagnostic field
    #[must_use]
    pub fn context_value(&self, key: &str) -> Option<&Value> {
        self.details.as_ref()?.context.get(key)
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl Error for ToolError {}
