// ABOUTME: Core types and constants for the tutor tool plugin runtime
// ABOUTME: Foundation crate with registration, execution, and configuration error types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

#![deny(unsafe_code)]

//! # Tutor Core
//!
//! Foundation crate providing the error taxonomy and constants shared by the
//! tool plugin runtime. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Registration-time `RegistryError`, execution-time `ToolError`,
//!   and `ConfigError` for environment configuration
//! - **constants**: Voice template defaults, fallback messages, and execution limits

/// Error types for registration, execution, and configuration
pub mod errors;

/// Application constants organized by domain
pub mod constants;
