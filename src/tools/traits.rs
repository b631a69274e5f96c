// ABOUTME: Defines the PluginHandler trait implemented by every tool's business logic.
// ABOUTME: Handlers are async, stateless with respect to the registry, and return ToolResult values.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Plugin Handler Trait
//!
//! A handler is the opaque function behind a plugin descriptor. It receives
//! already-validated arguments and the narrowed `ToolContext`, and must report
//! every failure as a `ToolError` value.

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value;

use super::context::ToolContext;
use super::result::ToolResult;

/// Business logic of a plugin.
///
/// # Design Notes
///
/// - Handlers are `Send + Sync` and may run concurrently across conversations
/// - Handlers may call back into the registry while executing
/// - Failures are values (`Err(ToolError)`), panics are caught by the orchestrator
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use serde_json::{json, Value};
/// use tutor_tools::tools::{PluginHandler, ToolContext, ToolResult};
///
/// struct EchoHandler;
///
/// #[async_trait]
/// impl PluginHandler for EchoHandler {
///     async fn handle(&self, args: Value, _context: &ToolContext) -> ToolResult<Value> {
///         Ok(json!({ "echo": args }))
///     }
/// }
/// ```
#[async_trait]
pub trait PluginHandler: Send + Sync {
    /// Execute the plugin's domain logic
    ///
    /// # Errors
    ///
    /// Returns a `ToolError` describing why the tool could not complete
    async fn handle(&self, args: Value, context: &ToolContext) -> ToolResult<Value>;
}

/// Adapter turning an async closure into a `PluginHandler`.
///
/// The closure receives an owned copy of the context so the returned future
/// does not borrow from the caller.
pub struct FnHandler<F, Fut> {
    func: F,
    _future: PhantomData<fn() -> Fut>,
}

impl<F, Fut> FnHandler<F, Fut>
where
    F: Fn(Value, ToolContext) -> Fut + Send + Sync,
    Fut: Future<Output = ToolResult<Value>> + Send,
{
    /// Wrap a closure
    #[must_use]
    pub const fn new(func: F) -> Self {
        Self {
            func,
            _future: PhantomData,
        }
    }
}

#[async_trait]
impl<F, Fut> PluginHandler for FnHandler<F, Fut>
where
    F: Fn(Value, ToolContext) -> Fut + Send + Sync,
    Fut: Future<Output = ToolResult<Value>> + Send,
{
    async fn handle(&self, args: Value, context: &ToolContext) -> ToolResult<Value> {
        (self.func)(args, context.clone()).await
    }
}
