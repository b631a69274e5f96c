// ABOUTME: Typed argument parsing shared by built-in handlers
// ABOUTME: Maps serde failures onto VALIDATION_FAILED tool errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

use serde::de::DeserializeOwned;
use serde_json::Value;
use tutor_core::errors::{ToolError, ValidationIssue};

use crate::tools::ToolResult;

/// Deserialize handler arguments into a typed struct
///
/// # Errors
///
/// Returns a `VALIDATION_FAILED` error describing the first mismatch
pub fn parse_args<T: DeserializeOwned>(args: Value) -> ToolResult<T> {
    serde_json::from_value(args).map_err(|e| {
        ToolError::validation_failed(vec![ValidationIssue::new(
            "arguments",
            format!("Invalid arguments: {e}"),
        )])
    })
}

/// Build a single-issue validation error
pub(crate) fn invalid(path: impl Into<String>, message: impl Into<String>) -> ToolError {
    ToolError::validation_failed(vec![ValidationIssue::new(path, message)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use tutor_core::errors::ToolErrorCode;

    #[derive(Debug, Deserialize)]
    struct Query {
        query: String,
    }

    #[test]
    fn parses_matching_arguments() {
        let parsed: Query = parse_args(json!({ "query": "fotosintesi" })).unwrap();
        assert_eq!(parsed.query, "fotosintesi");
    }

    #[test]
    fn type_mismatch_is_a_validation_failure() {
        let error = parse_args::<Query>(json!({ "query": 42 })).unwrap_err();
        assert_eq!(error.code, ToolErrorCode::ValidationFailed);
        assert!(error.message.starts_with("Invalid arguments"));
        assert_eq!(error.validation_errors().len(), 1);
    }
}
