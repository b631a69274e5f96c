// ABOUTME: Defines the ToolResult alias and its serializable ToolResponse wire form.
// ABOUTME: Success carries a typed payload; failure carries a ToolError value.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Tool Result Types
//!
//! - `ToolResult<T>` - `Result<T, ToolError>`, generic over the success payload
//! - `ToolResponse<T>` - the `{success, data?, error?}` shape sent to callers
//!
//! Handlers return `ToolResult<Value>`; typed payloads are converted with
//! [`to_payload`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tutor_core::errors::ToolError;

/// Result of executing a plugin
pub type ToolResult<T = Value> = Result<T, ToolError>;

/// Serialize a typed payload into the untyped form handlers return.
///
/// # Errors
///
/// Returns an `EXECUTION_FAILED` error if the payload cannot be represented as JSON
pub fn to_payload<T: Serialize>(payload: &T) -> ToolResult<Value> {
    serde_json::to_value(payload).map_err(|e| ToolError::from_error(&e))
}

/// Wire form of a `ToolResult`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse<T = Value> {
    /// Whether execution succeeded
    pub success: bool,
    /// Payload on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl<T> ToolResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create a failed response
    #[must_use]
    pub const fn failure(error: ToolError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    /// Convert back into a `ToolResult`.
    ///
    /// A failed response without an error body, or a successful one without
    /// data, becomes an `UNKNOWN` error.
    ///
    /// # Errors
    ///
    /// Returns the carried `ToolError` when `success` is false
    pub fn into_result(self) -> ToolResult<T> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => Ok(data),
            (false, _, Some(error)) => Err(error),
            (true, None, _) => Err(ToolError::unknown("Successful response carried no data")),
            (false, _, None) => Err(ToolError::unknown("Failed response carried no error")),
        }
    }
}

impl<T> From<ToolResult<T>> for ToolResponse<T> {
    fn from(result: ToolResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::failure(error),
        }
    }
}
