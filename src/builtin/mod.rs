// ABOUTME: Built-in plugins shipped with the runtime and their bootstrap registration
// ABOUTME: Web search delegates I/O to a SearchBackend; the mind map plugin is pure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Built-in Plugins
//!
//! | Id | Category | Permissions |
//! |----|----------|-------------|
//! | `web_search` | Utility | `read_conversation`, `voice_output` |
//! | `create_mindmap` | Creation | `write_content` |
//!
//! Both handlers are plain domain logic. Schema checks, permission gates and
//! deadlines are applied by the orchestrator before they run.

/// Typed argument parsing helpers
pub mod args;
/// `create_mindmap`
pub mod mindmap;
/// `web_search` and the `SearchBackend` seam
pub mod web_search;

use std::sync::Arc;

use tracing::info;
use tutor_core::errors::RegistryError;

pub use mindmap::{MindmapHandler, MindmapNode};
pub use web_search::{
    SearchBackend, SearchError, SearchHit, SearchKind, WebSearchHandler, WebSearchResponse,
};

use crate::plugins::PluginRegistry;

/// Register every built-in plugin
///
/// # Errors
///
/// Returns `RegistryError::DuplicatePlugin` if a built-in id is already taken
pub fn register_builtin_plugins(
    registry: &PluginRegistry,
    search_backend: Arc<dyn SearchBackend>,
) -> Result<(), RegistryError> {
    registry.register(web_search::descriptor(search_backend)?)?;
    registry.register(mindmap::descriptor()?)?;

    info!(
        plugins = ?[web_search::PLUGIN_ID, mindmap::PLUGIN_ID],
        "Registered built-in plugins"
    );
    Ok(())
}
