// ABOUTME: Closed enums and value types shared by plugin descriptors
// ABOUTME: Categories, permissions as bitflags, and voice template records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Plugin Value Types
//!
//! - `ToolCategory` - closed classification used for filtering
//! - `Permission` / `PermissionSet` - capabilities a plugin declares it needs
//! - `VoiceTemplate` - literal text or a `{template, requiresContext, fallback}` record

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Primary function of a plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    /// Produces new material (mind maps, flashcards, summaries)
    Creation,
    /// Explains or teaches
    Educational,
    /// Moves the learner around the application
    Navigation,
    /// Quizzes and evaluations
    Assessment,
    /// Everything else (search, calculators)
    Utility,
}

impl ToolCategory {
    /// Every category, in declaration order
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Creation,
            Self::Educational,
            Self::Navigation,
            Self::Assessment,
            Self::Utility,
        ]
    }

    /// Wire name of the category
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Creation => "creation",
            Self::Educational => "educational",
            Self::Navigation => "navigation",
            Self::Assessment => "assessment",
            Self::Utility => "utility",
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single capability a plugin may require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Read the current conversation
    ReadConversation,
    /// Read the learner profile
    ReadProfile,
    /// Create or modify learner content
    WriteContent,
    /// Speak through the voice channel
    VoiceOutput,
    /// Read or write files
    FileAccess,
}

impl Permission {
    /// Every permission, in declaration order
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::ReadConversation,
            Self::ReadProfile,
            Self::WriteContent,
            Self::VoiceOutput,
            Self::FileAccess,
        ]
    }

    /// Wire name of the permission
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadConversation => "read_conversation",
            Self::ReadProfile => "read_profile",
            Self::WriteContent => "write_content",
            Self::VoiceOutput => "voice_output",
            Self::FileAccess => "file_access",
        }
    }

    /// The flag representing this permission inside a `PermissionSet`
    #[must_use]
    pub const fn flag(self) -> PermissionSet {
        match self {
            Self::ReadConversation => PermissionSet::READ_CONVERSATION,
            Self::ReadProfile => PermissionSet::READ_PROFILE,
            Self::WriteContent => PermissionSet::WRITE_CONTENT,
            Self::VoiceOutput => PermissionSet::VOICE_OUTPUT,
            Self::FileAccess => PermissionSet::FILE_ACCESS,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Set of permissions declared by a plugin or granted to a caller.
    ///
    /// Set algebra keeps the orchestrator's subset check to a single
    /// `difference` call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct PermissionSet: u8 {
        /// See [`Permission::ReadConversation`]
        const READ_CONVERSATION = 0b0000_0001;
        /// See [`Permission::ReadProfile`]
        const READ_PROFILE = 0b0000_0010;
        /// See [`Permission::WriteContent`]
        const WRITE_CONTENT = 0b0000_0100;
        /// See [`Permission::VoiceOutput`]
        const VOICE_OUTPUT = 0b0000_1000;
        /// See [`Permission::FileAccess`]
        const FILE_ACCESS = 0b0001_0000;
    }
}

impl PermissionSet {
    /// Check whether a single permission is present
    #[must_use]
    pub const fn allows(self, permission: Permission) -> bool {
        self.contains(permission.flag())
    }

    /// Individual permissions in this set, in declaration order
    #[must_use]
    pub fn permissions(self) -> Vec<Permission> {
        Permission::all()
            .into_iter()
            .filter(|permission| self.allows(*permission))
            .collect()
    }

    /// Wire names of the permissions in this set
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        self.permissions().into_iter().map(Permission::as_str).collect()
    }

    /// Get a description of all permissions for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let names = self.names();
        if names.is_empty() {
            "none".to_owned()
        } else {
            names.join(", ")
        }
    }
}

impl From<Permission> for PermissionSet {
    fn from(permission: Permission) -> Self {
        permission.flag()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, permission| set | permission.flag())
    }
}

/// Structured voice template.
///
/// `requires_context` and `fallback` are stored for authors and tooling;
/// rendering always uses `template`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicePromptConfig {
    /// Text with `{name}` placeholders
    pub template: String,
    /// Variables the author expects to be present
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires_context: Vec<String>,
    /// Alternative text for when context is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl VoicePromptConfig {
    /// Create a config with only a template
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            requires_context: Vec::new(),
            fallback: None,
        }
    }

    /// Declare the context variables the template expects
    #[must_use]
    pub fn requires_context<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires_context = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the fallback text
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }
}

/// Voice prompt or feedback: either literal text or a config record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VoiceTemplate {
    /// Plain template text
    Text(String),
    /// Template with authoring metadata
    Config(VoicePromptConfig),
}

impl VoiceTemplate {
    /// Template text used for rendering
    #[must_use]
    pub fn template(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Config(config) => &config.template,
        }
    }

    /// Fallback text, when the template is a config carrying one
    #[must_use]
    pub fn fallback(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Config(config) => config.fallback.as_deref(),
        }
    }

    /// Check whether the template text is empty or whitespace
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.template().trim().is_empty()
    }
}

impl Default for VoiceTemplate {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for VoiceTemplate {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for VoiceTemplate {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<VoicePromptConfig> for VoiceTemplate {
    fn from(config: VoicePromptConfig) -> Self {
        Self::Config(config)
    }
}
