// ABOUTME: Voice feedback injector turning plugin templates into proposal and confirmation text
// ABOUTME: Resolves variables from context or result payload and surfaces trigger-matched plugins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Voice Feedback Injector
//!
//! Wraps a registry reference and produces the strings a conversation
//! orchestrator speaks:
//! - [`VoiceFeedbackInjector::inject_proposal`] asks whether to run a tool
//! - [`VoiceFeedbackInjector::inject_confirmation`] reports its outcome
//! - [`VoiceFeedbackInjector::contextual_triggers`] lists tools relevant to the
//!   current keywords or topic
//!
//! All operations are stateless reads over the registry's current contents.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use tutor_core::constants::voice::{
    completed_message, unavailable_message, vars, DEFAULT_ITEM_COUNT, DEFAULT_SUBJECT,
    DEFAULT_TOPIC,
};

use super::template::{render, TemplateVars};
use crate::plugins::registry::{global_registry, PluginRegistry};
use crate::tools::context::ToolContext;
use crate::tools::result::ToolResult;

/// Renders voice templates for registered plugins
#[derive(Clone)]
pub struct VoiceFeedbackInjector {
    registry: Arc<PluginRegistry>,
}

impl VoiceFeedbackInjector {
    /// Create an injector over an explicit registry
    #[must_use]
    pub const fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    /// Create an injector over the process-wide registry
    #[must_use]
    pub fn shared() -> Self {
        Self::new(global_registry())
    }

    /// Registry this injector reads from
    #[must_use]
    pub const fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// Build the proposal for a plugin.
    ///
    /// Unknown plugins yield `"Tool {id} is not available."`.
    #[must_use]
    pub fn inject_proposal(&self, plugin_id: &str, context: &ToolContext) -> String {
        let Some(plugin) = self.registry.get(plugin_id) else {
            debug!(plugin_id, "Proposal requested for unknown plugin");
            return unavailable_message(plugin_id);
        };

        let mut values = TemplateVars::new();
        values.extend_from_object(&context.extra);
        for (name, value) in context.identity_fields() {
            values.insert(name, value);
        }
        if let Some(topic) = &context.topic {
            values.insert(vars::TOPIC, topic.as_str());
        }
        if let Some(subject) = &context.subject {
            values.insert(vars::SUBJECT, subject.as_str());
        }
        values.insert_default(vars::TOPIC, DEFAULT_TOPIC);
        values.insert_default(vars::SUBJECT, DEFAULT_SUBJECT);
        values.insert(vars::TOOL_NAME, plugin.name());

        render(plugin.voice_prompt().template(), &values)
    }

    /// Build the confirmation for a finished execution.
    ///
    /// Scalar top-level fields of a successful payload are available to the
    /// template; `{itemCount}` defaults to `0`. Unknown plugins yield
    /// `"Tool {id} execution completed."`.
    #[must_use]
    pub fn inject_confirmation(&self, plugin_id: &str, result: &ToolResult<Value>) -> String {
        let Some(plugin) = self.registry.get(plugin_id) else {
            debug!(plugin_id, "Confirmation requested for unknown plugin");
            return completed_message(plugin_id);
        };

        let mut values = TemplateVars::new();
        match result {
            Ok(payload) => {
                values.insert(vars::SUCCESS, "true");
                if let Value::Object(fields) = payload {
                    values.extend_from_object(fields);
                }
            }
            Err(error) => {
                values.insert(vars::SUCCESS, "false");
                values.insert(vars::ERROR_CODE, error.code.as_str());
                values.insert(vars::ERROR_MESSAGE, error.message.as_str());
            }
        }
        values.insert_default(vars::ITEM_COUNT, DEFAULT_ITEM_COUNT);
        values.insert(vars::TOOL_NAME, plugin.name());

        render(plugin.voice_feedback().template(), &values)
    }

    /// Ids of plugins whose triggers match a context keyword or the topic.
    ///
    /// Matching is exact and case-insensitive. Ids are returned once each, in
    /// registration order.
    #[must_use]
    pub fn contextual_triggers(&self, context: &ToolContext) -> Vec<String> {
        let phrases = context
            .keywords
            .iter()
            .chain(context.topic.iter())
            .filter(|phrase| !phrase.trim().is_empty());

        let mut matched = HashSet::new();
        for phrase in phrases {
            for plugin in self.registry.get_by_trigger(phrase) {
                matched.insert(plugin.id().to_owned());
            }
        }
        if matched.is_empty() {
            return Vec::new();
        }

        self.registry
            .ids()
            .into_iter()
            .filter(|id| matched.contains(id))
            .collect()
    }
}

impl Default for VoiceFeedbackInjector {
    fn default() -> Self {
        Self::shared()
    }
}

impl fmt::Debug for VoiceFeedbackInjector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceFeedbackInjector")
            .field("plugin_count", &self.registry.len())
            .finish()
    }
}
