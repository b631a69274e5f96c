// ABOUTME: Handler execution configuration: deadline, schema validation, and argument logging
// ABOUTME: Parsed from TUTOR_TOOLS_* environment variables with strict value checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

use std::env;
use std::time::Duration;

use tutor_core::constants::env_keys;
use tutor_core::constants::execution::DEFAULT_HANDLER_TIMEOUT_MS;
use tutor_core::errors::ConfigError;

/// How the orchestrator runs handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Deadline for a single handler invocation
    pub handler_timeout: Duration,
    /// Validate arguments against the plugin schema before invoking the handler
    pub validate_arguments: bool,
    /// Include raw arguments in execution logs (may contain learner content)
    pub log_arguments: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            handler_timeout: Duration::from_millis(DEFAULT_HANDLER_TIMEOUT_MS),
            validate_arguments: true,
            log_arguments: false,
        }
    }
}

impl ExecutionConfig {
    /// Load execution configuration from environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a non-numeric or zero timeout, or a
    /// boolean flag that is not one of `true/false/1/0/yes/no`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            handler_timeout: parse_timeout(env::var(env_keys::HANDLER_TIMEOUT_MS).ok())?
                .unwrap_or(defaults.handler_timeout),
            validate_arguments: parse_flag(
                env_keys::VALIDATE_ARGUMENTS,
                env::var(env_keys::VALIDATE_ARGUMENTS).ok(),
            )?
            .unwrap_or(defaults.validate_arguments),
            log_arguments: parse_flag(
                env_keys::LOG_ARGUMENTS,
                env::var(env_keys::LOG_ARGUMENTS).ok(),
            )?
            .unwrap_or(defaults.log_arguments),
        })
    }

    /// Override the handler deadline
    #[must_use]
    pub const fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = timeout;
        self
    }

    /// Toggle schema validation
    #[must_use]
    pub const fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_arguments = enabled;
        self
    }

    /// Toggle argument logging
    #[must_use]
    pub const fn with_argument_logging(mut self, enabled: bool) -> Self {
        self.log_arguments = enabled;
        self
    }
}

fn parse_timeout(raw: Option<String>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::invalid_value(
            env_keys::HANDLER_TIMEOUT_MS,
            raw,
            "must be greater than zero",
        )),
        Ok(ms) => Ok(Some(Duration::from_millis(ms))),
        Err(_) => Err(ConfigError::invalid_value(
            env_keys::HANDLER_TIMEOUT_MS,
            raw,
            "must be a whole number of milliseconds",
        )),
    }
}

fn parse_flag(key: &'static str, raw: Option<String>) -> Result<Option<bool>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(Some(true)),
        "false" | "0" | "no" => Ok(Some(false)),
        _ => Err(ConfigError::invalid_value(key, raw, "must be a boolean")),
    }
}
