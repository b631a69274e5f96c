// ABOUTME: Central execution path that gates and runs plugin handlers
// ABOUTME: Checks existence, prerequisites, permissions and schema before a time-bounded handler call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Tool Orchestrator
//!
//! Every confirmed tool call goes through [`ToolOrchestrator::execute`]:
//!
//! 1. Unknown id: `PLUGIN_NOT_FOUND`
//! 2. Missing identity or a conflicting active tool: `PREREQUISITES_NOT_MET`
//! 3. Undeclared grant: `PERMISSION_DENIED`
//! 4. Schema violation: `VALIDATION_FAILED`
//! 5. Handler run under the configured deadline. Expiry gives `TIMEOUT`, and a
//!    panic becomes `EXECUTION_FAILED` with a generic message.
//!
//! Failures are always returned as values. Handlers receive only the
//! [`ToolContext`] part of the execution context.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures_util::FutureExt;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{instrument, warn};
use tutor_core::constants::execution::GENERIC_FAILURE_MESSAGE;
use tutor_core::errors::ToolError;

use super::context::{ExecutionContext, ToolContext};
use super::result::ToolResult;
use crate::config::ExecutionConfig;
use crate::logging::RuntimeLogger;
use crate::plugins::{PluginDescriptor, PluginMetadata, PluginRegistry, ToolCategory};

/// Runs plugin handlers on behalf of a conversation
#[derive(Debug, Clone)]
pub struct ToolOrchestrator {
    registry: Arc<PluginRegistry>,
    config: ExecutionConfig,
}

impl ToolOrchestrator {
    /// Create an orchestrator over a registry
    #[must_use]
    pub const fn new(registry: Arc<PluginRegistry>, config: ExecutionConfig) -> Self {
        Self { registry, config }
    }

    /// Registry this orchestrator executes from
    #[must_use]
    pub const fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// Execution settings in effect
    #[must_use]
    pub const fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Check that the caller is identified and no conflicting tool is active
    #[must_use]
    pub fn validate_prerequisites(
        plugin: &PluginDescriptor,
        context: &ExecutionContext,
    ) -> bool {
        let tool_context = context.tool_context();
        if tool_context.user_id.trim().is_empty() {
            return false;
        }
        let has_session = tool_context
            .session_id
            .as_deref()
            .is_some_and(|session| !session.trim().is_empty());
        if !has_session {
            return false;
        }

        !plugin
            .prerequisites()
            .iter()
            .any(|conflict| context.is_active(conflict))
    }

    /// Serializable description of one plugin
    #[must_use]
    pub fn tool_metadata(&self, plugin_id: &str) -> Option<PluginMetadata> {
        self.registry.get(plugin_id).map(|plugin| plugin.metadata())
    }

    /// Descriptions of every plugin in a category, in registration order
    #[must_use]
    pub fn tools_by_category(&self, category: ToolCategory) -> Vec<PluginMetadata> {
        self.registry
            .get_by_category(category)
            .iter()
            .map(|plugin| plugin.metadata())
            .collect()
    }

    /// Execute a plugin.
    ///
    /// Never panics and never returns a raw handler error: every failure is a
    /// [`ToolError`] inside the returned result.
    #[instrument(
        skip_all,
        fields(
            plugin_id = %plugin_id,
            conversation_id = %context.tool_context().conversation_id,
            user_id = %context.tool_context().user_id,
        )
    )]
    pub async fn execute(
        &self,
        plugin_id: &str,
        args: Value,
        context: &ExecutionContext,
    ) -> ToolResult<Value> {
        let started = Instant::now();
        let outcome = self.run(plugin_id, args, context).await;

        match &outcome {
            Ok(_) => RuntimeLogger::log_execution_completed(plugin_id, started.elapsed()),
            Err(error) => RuntimeLogger::log_execution_failed(
                plugin_id,
                error.code,
                &error.message,
                started.elapsed(),
            ),
        }
        outcome
    }

    async fn run(
        &self,
        plugin_id: &str,
        args: Value,
        context: &ExecutionContext,
    ) -> ToolResult<Value> {
        let Some(plugin) = self.registry.get(plugin_id) else {
            return Err(ToolError::plugin_not_found(plugin_id));
        };

        if !Self::validate_prerequisites(&plugin, context) {
            return Err(ToolError::prerequisites_not_met(plugin_id));
        }

        let missing = plugin.permissions().difference(context.granted_permissions);
        if !missing.is_empty() {
            return Err(ToolError::permission_denied(plugin_id, &missing.names()));
        }

        if self.config.validate_arguments {
            plugin.schema().validate(&args).map_err(|issues| {
                ToolError::validation_failed(issues).with_context("pluginId", plugin_id)
            })?;
        }

        let arguments = self.config.log_arguments.then(|| args.to_string());
        RuntimeLogger::log_execution_started(
            plugin_id,
            &context.tool_context().user_id,
            arguments.as_deref(),
        );

        self.invoke(&plugin, args, context.tool_context()).await
    }

    async fn invoke(
        &self,
        plugin: &PluginDescriptor,
        args: Value,
        context: &ToolContext,
    ) -> ToolResult<Value> {
        let call = AssertUnwindSafe(plugin.handler().handle(args, context)).catch_unwind();

        match timeout(self.config.handler_timeout, call).await {
            Ok(Ok(result)) => result,
            Ok(Err(_panic)) => {
                warn!(plugin_id = %plugin.id(), "Plugin handler panicked");
                Err(ToolError::execution_failed(GENERIC_FAILURE_MESSAGE)
                    .with_context("pluginId", plugin.id()))
            }
            Err(_elapsed) => Err(ToolError::timeout(plugin.id(), self.config.handler_timeout)),
        }
    }
}
