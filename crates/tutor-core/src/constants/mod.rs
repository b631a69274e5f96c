// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Voice template defaults and execution limits for the plugin runtime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! Constants module
//!
//! Constants are grouped by the subsystem that reads them.

/// Voice template defaults and fallback messages
pub mod voice;

/// Handler execution defaults
pub mod execution {
    /// Default handler deadline in milliseconds
    pub const DEFAULT_HANDLER_TIMEOUT_MS: u64 = 30_000;
    /// Message used when a handler fails without a usable description
    pub const GENERIC_FAILURE_MESSAGE: &str = "Tool execution failed";
}

/// Environment variable names read by the runtime configuration
pub mod env_keys {
    /// Handler deadline in milliseconds
    pub const HANDLER_TIMEOUT_MS: &str = "TUTOR_TOOLS_HANDLER_TIMEOUT_MS";
    /// Toggle for centralized schema validation
    pub const VALIDATE_ARGUMENTS: &str = "TUTOR_TOOLS_VALIDATE_ARGUMENTS";
    /// Toggle for logging raw tool arguments
    pub const LOG_ARGUMENTS: &str = "TUTOR_TOOLS_LOG_ARGUMENTS";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Default service name
    pub const TUTOR_TOOLS: &str = "tutor-tools";
}
