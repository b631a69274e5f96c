// ABOUTME: Tool execution module: context types, the handler trait, results, and the orchestrator
// ABOUTME: Everything needed to invoke a registered plugin and interpret its outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! Tool execution: the contract between the runtime and plugin handlers.

/// Per-call context passed to handlers and templates
pub mod context;
/// Central gated execution path
pub mod orchestrator;
/// `ToolResult` and its wire form
pub mod result;
/// `PluginHandler` trait and closure adapter
pub mod traits;

pub use context::{ExecutionContext, ToolContext};
pub use orchestrator::ToolOrchestrator;
pub use result::{to_payload, ToolResponse, ToolResult};
pub use traits::{FnHandler, PluginHandler};
pub use tutor_core::errors::{ToolError, ToolErrorCode, ValidationIssue};
