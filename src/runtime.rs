// ABOUTME: Application context bundling one registry with its orchestrator and voice injector
// ABOUTME: Implements propose -> confirm -> execute -> confirmation text for a conversation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Tool Runtime
//!
//! [`ToolRuntime`] is what a conversation orchestrator holds. It owns one
//! `Arc<PluginRegistry>` and shares it with a [`ToolOrchestrator`] and a
//! [`VoiceFeedbackInjector`], so all three always see the same plugins.
//!
//! ```rust
//! use tutor_tools::config::RuntimeConfig;
//! use tutor_tools::runtime::ToolRuntime;
//! use tutor_tools::tools::ToolContext;
//!
//! let runtime = ToolRuntime::new(&RuntimeConfig::default());
//! let context = ToolContext::new("conv-1", "user-1");
//! assert_eq!(
//!     runtime.propose("create_mindmap", &context),
//!     "Tool create_mindmap is not available."
//! );
//! ```

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use tutor_core::errors::ConfigError;

use crate::config::{ExecutionConfig, RuntimeConfig};
use crate::plugins::{global_registry, PluginRegistry};
use crate::tools::{ExecutionContext, ToolContext, ToolOrchestrator, ToolResult};
use crate::voice::VoiceFeedbackInjector;

/// Outcome of a confirmed tool call together with its spoken confirmation
#[derive(Debug, Clone)]
pub struct ConfirmedExecution {
    /// Handler result, or the gate that rejected the call
    pub result: ToolResult<Value>,
    /// Confirmation text rendered from the plugin's feedback template
    pub feedback: String,
}

impl ConfirmedExecution {
    /// Whether the tool completed successfully
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Registry, orchestrator and injector sharing one plugin set
#[derive(Debug, Clone)]
pub struct ToolRuntime {
    registry: Arc<PluginRegistry>,
    orchestrator: ToolOrchestrator,
    injector: VoiceFeedbackInjector,
}

impl ToolRuntime {
    /// Create a runtime with a fresh, empty registry
    #[must_use]
    pub fn new(config: &RuntimeConfig) -> Self {
        Self::with_registry(Arc::new(PluginRegistry::new()), config.execution)
    }

    /// Create a runtime around an existing registry
    #[must_use]
    pub fn with_registry(registry: Arc<PluginRegistry>, config: ExecutionConfig) -> Self {
        Self {
            orchestrator: ToolOrchestrator::new(Arc::clone(&registry), config),
            injector: VoiceFeedbackInjector::new(Arc::clone(&registry)),
            registry,
        }
    }

    /// Create a runtime around the process-wide registry
    #[must_use]
    pub fn shared(config: ExecutionConfig) -> Self {
        Self::with_registry(global_registry(), config)
    }

    /// Create a runtime with a fresh registry, configured from the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an execution setting is malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(&RuntimeConfig::from_env()?))
    }

    /// Plugin registry
    #[must_use]
    pub const fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// Execution orchestrator
    #[must_use]
    pub const fn orchestrator(&self) -> &ToolOrchestrator {
        &self.orchestrator
    }

    /// Voice feedback injector
    #[must_use]
    pub const fn injector(&self) -> &VoiceFeedbackInjector {
        &self.injector
    }

    /// Proposal text for a candidate plugin
    #[must_use]
    pub fn propose(&self, plugin_id: &str, context: &ToolContext) -> String {
        self.injector.inject_proposal(plugin_id, context)
    }

    /// Ids of plugins worth proposing for the current keywords and topic
    #[must_use]
    pub fn suggest(&self, context: &ToolContext) -> Vec<String> {
        self.injector.contextual_triggers(context)
    }

    /// Run a plugin the learner agreed to and render its confirmation
    pub async fn execute_confirmed(
        &self,
        plugin_id: &str,
        args: Value,
        context: &ExecutionContext,
    ) -> ConfirmedExecution {
        let result = self.orchestrator.execute(plugin_id, args, context).await;
        let feedback = self.injector.inject_confirmation(plugin_id, &result);
        debug!(plugin_id, success = result.is_ok(), "Rendered tool confirmation");

        ConfirmedExecution { result, feedback }
    }
}
