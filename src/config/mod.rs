// ABOUTME: Environment-driven configuration for the tool plugin runtime
// ABOUTME: Execution limits and logging settings loaded without config files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Runtime Configuration
//!
//! Environment-only configuration. Every setting has a default, and malformed
//! values are reported as `ConfigError::InvalidValue` rather than ignored.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TUTOR_TOOLS_HANDLER_TIMEOUT_MS` | `30000` |
//! | `TUTOR_TOOLS_VALIDATE_ARGUMENTS` | `true` |
//! | `TUTOR_TOOLS_LOG_ARGUMENTS` | `false` |

/// Handler execution settings
pub mod execution;

pub use execution::ExecutionConfig;

use tutor_core::errors::ConfigError;

use crate::logging::LoggingConfig;

/// Complete runtime configuration
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Handler execution settings
    pub execution: ExecutionConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl RuntimeConfig {
    /// Load the full configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an execution setting is malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            execution: ExecutionConfig::from_env()?,
            logging: LoggingConfig::from_env(),
        })
    }
}
