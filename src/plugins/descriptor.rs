// ABOUTME: Immutable plugin descriptor describing one tool's identity, schema, handler, and voice templates
// ABOUTME: Built with PluginDescriptorBuilder; shape checks run when the registry accepts it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Plugin Descriptor
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use tutor_tools::plugins::{ObjectSchema, PluginDescriptor, ToolCategory};
//! use tutor_tools::errors::ToolError;
//! use tutor_tools::tools::{FnHandler, ToolContext};
//!
//! let descriptor = PluginDescriptor::builder("create_summary", "Riassunto", ToolCategory::Creation)
//!     .schema(Arc::new(ObjectSchema::new()))
//!     .handler(Arc::new(FnHandler::new(|_args, _ctx: ToolContext| async {
//!         Ok::<_, ToolError>(json!({ "itemCount": 1 }))
//!     })))
//!     .voice_prompt("Vuoi un riassunto su {topic}?")
//!     .voice_feedback("Ho creato {toolName}")
//!     .triggers(["riassunto", "summary"])
//!     .build();
//!
//! assert!(descriptor.is_ok());
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tutor_core::errors::RegistryError;

use super::schema::ArgumentSchema;
use super::types::{Permission, PermissionSet, ToolCategory, VoiceTemplate};
use crate::tools::traits::PluginHandler;

/// Plugin ids are lowercase ASCII letters and underscores
static PLUGIN_ID_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z_]+$").ok());

/// Everything the runtime knows about one tool.
///
/// Descriptors are immutable once built and shared as `Arc<PluginDescriptor>`.
#[derive(Clone)]
pub struct PluginDescriptor {
    id: String,
    name: String,
    category: ToolCategory,
    schema: Arc<dyn ArgumentSchema>,
    handler: Arc<dyn PluginHandler>,
    voice_prompt: VoiceTemplate,
    voice_feedback: VoiceTemplate,
    triggers: Vec<String>,
    prerequisites: Vec<String>,
    permissions: PermissionSet,
}

impl PluginDescriptor {
    /// Start building a descriptor
    #[must_use]
    pub fn builder(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ToolCategory,
    ) -> PluginDescriptorBuilder {
        PluginDescriptorBuilder::new(id, name, category)
    }

    /// Unique plugin id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name spoken to the learner
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plugin category
    #[must_use]
    pub const fn category(&self) -> ToolCategory {
        self.category
    }

    /// Argument schema
    #[must_use]
    pub fn schema(&self) -> &Arc<dyn ArgumentSchema> {
        &self.schema
    }

    /// Business logic
    #[must_use]
    pub fn handler(&self) -> &Arc<dyn PluginHandler> {
        &self.handler
    }

    /// Template used to propose the tool
    #[must_use]
    pub const fn voice_prompt(&self) -> &VoiceTemplate {
        &self.voice_prompt
    }

    /// Template used to confirm the tool ran
    #[must_use]
    pub const fn voice_feedback(&self) -> &VoiceTemplate {
        &self.voice_feedback
    }

    /// Phrases matched against conversation keywords
    #[must_use]
    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    /// Plugin ids that must not be active when this one runs
    #[must_use]
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    /// Permissions the plugin requires
    #[must_use]
    pub const fn permissions(&self) -> PermissionSet {
        self.permissions
    }

    /// Check whether any trigger equals `phrase`, ignoring case
    #[must_use]
    pub fn has_trigger(&self, phrase: &str) -> bool {
        let wanted = phrase.to_lowercase();
        self.triggers
            .iter()
            .any(|trigger| trigger.to_lowercase() == wanted)
    }

    /// Serializable summary for listings and introspection
    #[must_use]
    pub fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            id: self.id.clone(),
            name: self.name.clone(),
            category: self.category,
            voice_prompt: self.voice_prompt.clone(),
            voice_feedback: self.voice_feedback.clone(),
            triggers: self.triggers.clone(),
            prerequisites: self.prerequisites.clone(),
            permissions: self.permissions.permissions(),
            input_schema: self.schema.describe(),
        }
    }

    /// Check the descriptor shape.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidPlugin` naming the first offending field
    pub fn validate(&self) -> Result<(), RegistryError> {
        let id_ok = PLUGIN_ID_PATTERN
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(&self.id));
        if !id_ok {
            return Err(RegistryError::invalid(
                &self.id,
                "id",
                "must contain only lowercase letters and underscores",
            ));
        }
        if self.name.trim().is_empty() {
            return Err(RegistryError::invalid(&self.id, "name", "must not be empty"));
        }
        if self.voice_prompt.is_blank() {
            return Err(RegistryError::invalid(
                &self.id,
                "voicePrompt",
                "must not be empty",
            ));
        }
        if self.voice_feedback.is_blank() {
            return Err(RegistryError::invalid(
                &self.id,
                "voiceFeedback",
                "must not be empty",
            ));
        }
        if self.triggers.is_empty() {
            return Err(RegistryError::invalid(
                &self.id,
                "triggers",
                "must contain at least one phrase",
            ));
        }
        if self.triggers.iter().any(|trigger| trigger.trim().is_empty()) {
            return Err(RegistryError::invalid(
                &self.id,
                "triggers",
                "must not contain empty phrases",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("triggers", &self.triggers)
            .field("prerequisites", &self.prerequisites)
            .field("permissions", &self.permissions.describe())
            .finish_non_exhaustive()
    }
}

/// Serializable view of a descriptor (everything except the handler)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginMetadata {
    /// Unique plugin id
    pub id: String,
    /// Display name
    pub name: String,
    /// Category
    pub category: ToolCategory,
    /// Proposal template
    pub voice_prompt: VoiceTemplate,
    /// Confirmation template
    pub voice_feedback: VoiceTemplate,
    /// Trigger phrases
    pub triggers: Vec<String>,
    /// Conflicting plugin ids
    pub prerequisites: Vec<String>,
    /// Required permissions
    pub permissions: Vec<Permission>,
    /// Schema description
    pub input_schema: serde_json::Value,
}

/// Builder for [`PluginDescriptor`]
pub struct PluginDescriptorBuilder {
    id: String,
    name: String,
    category: ToolCategory,
    schema: Option<Arc<dyn ArgumentSchema>>,
    handler: Option<Arc<dyn PluginHandler>>,
    voice_prompt: VoiceTemplate,
    voice_feedback: VoiceTemplate,
    triggers: Vec<String>,
    prerequisites: Vec<String>,
    permissions: PermissionSet,
}

impl PluginDescriptorBuilder {
    fn new(id: impl Into<String>, name: impl Into<String>, category: ToolCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            schema: None,
            handler: None,
            voice_prompt: VoiceTemplate::default(),
            voice_feedback: VoiceTemplate::default(),
            triggers: Vec::new(),
            prerequisites: Vec::new(),
            permissions: PermissionSet::empty(),
        }
    }

    /// Set the argument schema
    #[must_use]
    pub fn schema(mut self, schema: Arc<dyn ArgumentSchema>) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Set the handler
    #[must_use]
    pub fn handler(mut self, handler: Arc<dyn PluginHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Set the proposal template
    #[must_use]
    pub fn voice_prompt(mut self, template: impl Into<VoiceTemplate>) -> Self {
        self.voice_prompt = template.into();
        self
    }

    /// Set the confirmation template
    #[must_use]
    pub fn voice_feedback(mut self, template: impl Into<VoiceTemplate>) -> Self {
        self.voice_feedback = template.into();
        self
    }

    /// Replace the trigger phrases
    #[must_use]
    pub fn triggers<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.triggers = triggers.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the prerequisite ids
    #[must_use]
    pub fn prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the required permissions
    #[must_use]
    pub fn permissions(mut self, permissions: impl Into<PermissionSet>) -> Self {
        self.permissions = permissions.into();
        self
    }

    /// Finish the descriptor.
    ///
    /// Only presence of the schema and handler is checked here; the registry
    /// performs the full shape check on `register`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidPlugin` when the schema or handler is missing
    pub fn build(self) -> Result<PluginDescriptor, RegistryError> {
        let schema = self
            .schema
            .ok_or_else(|| RegistryError::invalid(&self.id, "schema", "is required"))?;
        let handler = self
            .handler
            .ok_or_else(|| RegistryError::invalid(&self.id, "handler", "is required"))?;

        Ok(PluginDescriptor {
            id: self.id,
            name: self.name,
            category: self.category,
            schema,
            handler,
            voice_prompt: self.voice_prompt,
            voice_feedback: self.voice_feedback,
            triggers: self.triggers,
            prerequisites: self.prerequisites,
            permissions: self.permissions,
        })
    }
}

impl fmt::Debug for PluginDescriptorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptorBuilder")
            .field("id", &self.id)
            .field("has_schema", &self.schema.is_some())
            .field("has_handler", &self.handler.is_some())
            .finish_non_exhaustive()
    }
}
