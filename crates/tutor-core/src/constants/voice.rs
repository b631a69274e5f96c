// ABOUTME: Voice template constants for proposal and confirmation rendering
// ABOUTME: Default substitutions, fallback messages, and reserved variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

/// Substituted for `{topic}` when the context has none
pub const DEFAULT_TOPIC: &str = "this topic";

/// Substituted for `{subject}` when the context has none
pub const DEFAULT_SUBJECT: &str = "this subject";

/// Substituted for `{itemCount}` when the result has none
pub const DEFAULT_ITEM_COUNT: &str = "0";

/// Template variable names understood by the injector
pub mod vars {
    /// Plugin display name
    pub const TOOL_NAME: &str = "toolName";
    /// Conversation topic
    pub const TOPIC: &str = "topic";
    /// School subject
    pub const SUBJECT: &str = "subject";
    /// Number of produced items
    pub const ITEM_COUNT: &str = "itemCount";
    /// Outcome flag of the execution
    pub const SUCCESS: &str = "success";
    /// Error code of a failed execution
    pub const ERROR_CODE: &str = "errorCode";
    /// Error message of a failed execution
    pub const ERROR_MESSAGE: &str = "errorMessage";
}

/// Names that must never resolve, even when supplied by a caller.
///
/// Any name starting with a double underscore is rejected as well.
pub const RESERVED_VARIABLE_NAMES: &[&str] = &[
    "__proto__",
    "constructor",
    "prototype",
    "hasOwnProperty",
    "isPrototypeOf",
    "propertyIsEnumerable",
    "toLocaleString",
    "toString",
    "valueOf",
];

/// Message returned when a proposal is requested for an unknown plugin
#[must_use]
pub fn unavailable_message(plugin_id: &str) -> String {
    format!("Tool {plugin_id} is not available.")
}

/// Message returned when a confirmation is requested for an unknown plugin
#[must_use]
pub fn completed_message(plugin_id: &str) -> String {
    format!("Tool {plugin_id} execution completed.")
}
