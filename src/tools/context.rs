// ABOUTME: Defines ToolContext and ExecutionContext passed to plugins and the orchestrator.
// ABOUTME: Handlers see only the narrowed ToolContext; authorization data stays with the orchestrator.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Tool Contexts
//!
//! Two context objects exist:
//! - `ToolContext` - conversation identity plus optional topic/subject/keyword
//!   hints. Handlers receive it, and the voice injector reads from it.
//! - `ExecutionContext` - a `ToolContext` plus the active tool list and the
//!   granted permissions, used by the orchestrator to gate execution.
//!
//! Caller-specific fields that are not part of the fixed shape land in
//! `ToolContext::extra`. The injector only reads scalar values from it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::plugins::types::{Permission, PermissionSet};

/// Per-invocation conversation context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolContext {
    /// Conversation the tool runs in
    pub conversation_id: String,
    /// Learner the tool runs for
    pub user_id: String,
    /// Voice or chat session identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Tutor persona driving the conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maestro_id: Option<String>,
    /// Current conversation topic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Current school subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Keywords extracted from the conversation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Caller-supplied extension fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolContext {
    /// Create a context with the required identifiers
    #[must_use]
    pub fn new(conversation_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Set session ID
    #[must_use]
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Set maestro ID
    #[must_use]
    pub fn with_maestro(mut self, maestro_id: impl Into<String>) -> Self {
        self.maestro_id = Some(maestro_id.into());
        self
    }

    /// Set topic
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Set subject
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Replace keywords
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Add an extension field
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Identifier fields as `(name, value)` pairs, skipping absent ones
    #[must_use]
    pub fn identity_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("conversationId", self.conversation_id.as_str()),
            ("userId", self.user_id.as_str()),
        ];
        if let Some(session_id) = &self.session_id {
            fields.push(("sessionId", session_id));
        }
        if let Some(maestro_id) = &self.maestro_id {
            fields.push(("maestroId", maestro_id));
        }
        fields
    }
}

/// Context the orchestrator needs to decide whether a plugin may run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionContext {
    /// Context forwarded to the handler
    #[serde(flatten)]
    pub tool_context: ToolContext,
    /// Plugins currently running in this conversation
    #[serde(default)]
    pub active_tools: Vec<String>,
    /// Permissions granted to the caller
    #[serde(default)]
    pub granted_permissions: PermissionSet,
}

impl ExecutionContext {
    /// Wrap a tool context with no active tools and no permissions
    #[must_use]
    pub fn new(tool_context: ToolContext) -> Self {
        Self {
            tool_context,
            active_tools: Vec::new(),
            granted_permissions: PermissionSet::empty(),
        }
    }

    /// Replace the active tool list
    #[must_use]
    pub fn with_active_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_tools = tools.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the granted permission set
    #[must_use]
    pub fn with_permissions(mut self, permissions: PermissionSet) -> Self {
        self.granted_permissions = permissions;
        self
    }

    /// Grant one more permission
    #[must_use]
    pub fn grant(mut self, permission: Permission) -> Self {
        self.granted_permissions |= permission.flag();
        self
    }

    /// The narrowed context handed to plugin handlers
    #[must_use]
    pub const fn tool_context(&self) -> &ToolContext {
        &self.tool_context
    }

    /// Check whether a plugin is currently active
    #[must_use]
    pub fn is_active(&self, plugin_id: &str) -> bool {
        self.active_tools.iter().any(|active| active == plugin_id)
    }
}

impl From<ToolContext> for ExecutionContext {
    fn from(tool_context: ToolContext) -> Self {
        Self::new(tool_context)
    }
}
