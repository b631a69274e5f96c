// ABOUTME: Plugin registry storing descriptors with lookup by id, category, trigger, and permission
// ABOUTME: Reader/writer locked so concurrent conversations can read while bootstrap registers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Plugin Registry
//!
//! Central store of [`PluginDescriptor`]s, providing:
//! - Registration with uniqueness and shape checks
//! - Lookup by id, category, permission, and trigger phrase
//! - Snapshot listings that never expose internal storage
//! - Explicit `clear()` and fresh `new()` instances for test isolation
//!
//! Applications construct one registry and pass it around as
//! `Arc<PluginRegistry>`. [`global_registry`] exists for single-instance hosting.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tutor_core::errors::RegistryError;

use super::descriptor::PluginDescriptor;
use super::types::{Permission, ToolCategory};

#[derive(Default)]
struct RegistryState {
    /// Registered descriptors by id
    plugins: HashMap<String, Arc<PluginDescriptor>>,
    /// Ids in registration order
    order: Vec<String>,
    /// Lowercased trigger phrase to ids, in registration order
    triggers: HashMap<String, Vec<String>>,
}

impl RegistryState {
    fn collect<'a>(&self, ids: impl IntoIterator<Item = &'a String>) -> Vec<Arc<PluginDescriptor>> {
        ids.into_iter()
            .filter_map(|id| self.plugins.get(id).cloned())
            .collect()
    }

    fn filter(&self, predicate: impl Fn(&PluginDescriptor) -> bool) -> Vec<Arc<PluginDescriptor>> {
        self.order
            .iter()
            .filter_map(|id| self.plugins.get(id))
            .filter(|plugin| predicate(plugin))
            .cloned()
            .collect()
    }
}

/// Registry of plugin descriptors.
///
/// # Thread Safety
///
/// All methods take `&self`. Reads share a lock and never block each other;
/// `register`, `unregister`, and `clear` take the write lock so readers never
/// observe partial state. No lock is held while a handler runs.
///
/// # Example
///
/// ```
/// use tutor_tools::plugins::PluginRegistry;
///
/// let registry = PluginRegistry::new();
/// assert!(registry.is_empty());
/// assert!(registry.get("web_search").is_none());
/// ```
pub struct PluginRegistry {
    state: RwLock<RegistryState>,
}

impl PluginRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
        }
    }

    // Every write leaves the maps consistent, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a plugin descriptor.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidPlugin` if the descriptor fails its shape
    /// check, or `RegistryError::DuplicatePlugin` if the id is already taken.
    /// Other registrations are left untouched in both cases.
    pub fn register(&self, descriptor: PluginDescriptor) -> Result<(), RegistryError> {
        if let Err(error) = descriptor.validate() {
            warn!(plugin_id = %descriptor.id(), %error, "Rejected plugin registration");
            return Err(error);
        }

        let mut state = self.write();
        if state.plugins.contains_key(descriptor.id()) {
            warn!(plugin_id = %descriptor.id(), "Plugin is already registered");
            return Err(RegistryError::duplicate(descriptor.id()));
        }

        debug!(
            "Registering plugin '{}' ({}) with permissions: {}",
            descriptor.id(),
            descriptor.category(),
            descriptor.permissions().describe()
        );

        let id = descriptor.id().to_owned();
        for trigger in descriptor.triggers() {
            let ids = state.triggers.entry(trigger.to_lowercase()).or_default();
            if !ids.contains(&id) {
                ids.push(id.clone());
            }
        }
        state.order.push(id.clone());
        state.plugins.insert(id, Arc::new(descriptor));
        Ok(())
    }

    /// Register several descriptors, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Returns the first `RegistryError` encountered; earlier descriptors stay registered
    pub fn register_all(
        &self,
        descriptors: impl IntoIterator<Item = PluginDescriptor>,
    ) -> Result<(), RegistryError> {
        for descriptor in descriptors {
            self.register(descriptor)?;
        }
        Ok(())
    }

    /// Remove a plugin.
    ///
    /// Returns `true` only when the id was present.
    pub fn unregister(&self, plugin_id: &str) -> bool {
        let mut state = self.write();
        let Some(removed) = state.plugins.remove(plugin_id) else {
            return false;
        };

        state.order.retain(|id| id != plugin_id);
        for trigger in removed.triggers() {
            let key = trigger.to_lowercase();
            if let Some(ids) = state.triggers.get_mut(&key) {
                ids.retain(|id| id != plugin_id);
                if ids.is_empty() {
                    state.triggers.remove(&key);
                }
            }
        }

        info!("Unregistered plugin: {plugin_id}");
        true
    }

    /// Remove every plugin; previously used ids may be registered again
    pub fn clear(&self) {
        let mut state = self.write();
        let removed = state.plugins.len();
        *state = RegistryState::default();
        info!("Cleared plugin registry ({removed} plugins removed)");
    }

    /// Get a plugin by id
    #[must_use]
    pub fn get(&self, plugin_id: &str) -> Option<Arc<PluginDescriptor>> {
        self.read().plugins.get(plugin_id).cloned()
    }

    /// Check if a plugin is registered
    #[must_use]
    pub fn has(&self, plugin_id: &str) -> bool {
        self.read().plugins.contains_key(plugin_id)
    }

    /// Snapshot of every plugin in registration order.
    ///
    /// Each call returns a new collection; changing it never affects the registry.
    #[must_use]
    pub fn get_all(&self) -> Vec<Arc<PluginDescriptor>> {
        let state = self.read();
        state.collect(&state.order)
    }

    /// Registered ids in registration order
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.read().order.clone()
    }

    /// Get the number of registered plugins
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().plugins.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().plugins.is_empty()
    }

    /// Plugins in a category
    #[must_use]
    pub fn get_by_category(&self, category: ToolCategory) -> Vec<Arc<PluginDescriptor>> {
        self.read().filter(|plugin| plugin.category() == category)
    }

    /// Plugins that declare a permission
    #[must_use]
    pub fn get_by_permission(&self, permission: Permission) -> Vec<Arc<PluginDescriptor>> {
        self.read().filter(|plugin| plugin.permissions().allows(permission))
    }

    /// Plugins with a trigger equal to `phrase`, ignoring case.
    ///
    /// This is exact matching: `"mappa"` does not match `"mappa mentale"`.
    #[must_use]
    pub fn get_by_trigger(&self, phrase: &str) -> Vec<Arc<PluginDescriptor>> {
        let state = self.read();
        state
            .triggers
            .get(&phrase.to_lowercase())
            .map(|ids| state.collect(ids))
            .unwrap_or_default()
    }

    /// Get plugin statistics
    #[must_use]
    pub fn statistics(&self) -> PluginRegistryStatistics {
        let state = self.read();
        let mut stats = PluginRegistryStatistics {
            total_plugins: state.plugins.len(),
            distinct_triggers: state.triggers.len(),
            ..Default::default()
        };

        for plugin in state.plugins.values() {
            match plugin.category() {
                ToolCategory::Creation => stats.creation_plugins += 1,
                ToolCategory::Educational => stats.educational_plugins += 1,
                ToolCategory::Navigation => stats.navigation_plugins += 1,
                ToolCategory::Assessment => stats.assessment_plugins += 1,
                ToolCategory::Utility => stats.utility_plugins += 1,
            }
        }

        stats
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("PluginRegistry")
            .field("plugin_count", &state.plugins.len())
            .field("plugins", &state.order)
            .field("trigger_count", &state.triggers.len())
            .finish()
    }
}

/// Plugin registry statistics for monitoring
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRegistryStatistics {
    /// Total number of registered plugins
    pub total_plugins: usize,
    /// Number of distinct lowercased trigger phrases
    pub distinct_triggers: usize,
    /// Number of creation plugins
    pub creation_plugins: usize,
    /// Number of educational plugins
    pub educational_plugins: usize,
    /// Number of navigation plugins
    pub navigation_plugins: usize,
    /// Number of assessment plugins
    pub assessment_plugins: usize,
    /// Number of utility plugins
    pub utility_plugins: usize,
}

static GLOBAL_REGISTRY: OnceLock<Arc<PluginRegistry>> = OnceLock::new();

/// Get the process-wide plugin registry.
///
/// Convenience for single-instance hosting. Prefer passing an
/// `Arc<PluginRegistry>` explicitly; tests should create local
/// `PluginRegistry::new()` instances, or call `clear()` on this one.
#[must_use]
pub fn global_registry() -> Arc<PluginRegistry> {
    Arc::clone(GLOBAL_REGISTRY.get_or_init(|| Arc::new(PluginRegistry::new())))
}
