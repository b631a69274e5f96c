// ABOUTME: Plugin system module: descriptors, argument schemas, closed enums, and the registry
// ABOUTME: Tools are described once at bootstrap and looked up concurrently afterwards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Plugin System
//!
//! A plugin is a capability invocable mid-conversation (a mind map generator,
//! a web search). Each one is described by an immutable [`PluginDescriptor`]
//! and stored in a [`PluginRegistry`].

/// Immutable plugin descriptors and their builder
pub mod descriptor;
/// Plugin registry with multi-key lookup
pub mod registry;
/// Argument schemas
pub mod schema;
/// Categories, permissions, and voice templates
pub mod types;

pub use descriptor::{PluginDescriptor, PluginDescriptorBuilder, PluginMetadata};
pub use registry::{global_registry, PluginRegistry, PluginRegistryStatistics};
pub use schema::{ArgumentSchema, FieldRule, ListRule, NumberRule, ObjectSchema, TextRule};
pub use types::{Permission, PermissionSet, ToolCategory, VoicePromptConfig, VoiceTemplate};
