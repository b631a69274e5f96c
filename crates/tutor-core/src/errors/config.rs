// ABOUTME: Configuration error types for environment-driven runtime settings
// ABOUTME: Reports the offending key and value when parsing fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

/// Errors raised while loading configuration from the environment
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable was set to a value that cannot be used
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        /// Environment variable name
        key: &'static str,
        /// Raw value that was rejected
        value: String,
        /// Why the value was rejected
        reason: &'static str,
    },
}

impl ConfigError {
    /// Create an invalid value error
    #[must_use]
    pub fn invalid_value(key: &'static str, value: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidValue {
            key,
            value: value.into(),
            reason,
        }
    }
}
