// ABOUTME: Error module for the tool plugin runtime
// ABOUTME: Re-exports registration, execution, and configuration error types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Error Types
//!
//! Two regimes live here. Registration faults (`RegistryError`) are raised to
//! the bootstrap path and are expected to abort start-up. Execution faults
//! (`ToolError`) are returned as values so they can be spoken back to a user.

/// Configuration errors raised while reading the environment
pub mod config;
/// Registration-time errors raised by the plugin registry
pub mod registry;
/// Execution-time errors returned inside tool results
pub mod tool;

pub use config::ConfigError;
pub use registry::RegistryError;
pub use tool::{ErrorDetails, ToolError, ToolErrorCode, ValidationIssue};
