// ABOUTME: Registration-time error types for the plugin registry
// ABOUTME: Duplicate ids and malformed descriptors abort the bootstrap path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

/// Errors raised when a plugin descriptor is registered.
///
/// These represent developer misconfiguration. Callers are expected to
/// propagate them with `?` out of their bootstrap routine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A plugin with the same id is already registered
    #[error("Plugin '{plugin_id}' is already registered")]
    DuplicatePlugin {
        /// Id that collided with an existing registration
        plugin_id: String,
    },

    /// The descriptor failed a shape check
    #[error("Invalid plugin '{plugin_id}': {field} {reason}")]
    InvalidPlugin {
        /// Id of the rejected descriptor (may itself be the invalid field)
        plugin_id: String,
        /// Descriptor field that failed validation
        field: &'static str,
        /// Why the field was rejected
        reason: String,
    },
}

impl RegistryError {
    /// Create a duplicate plugin error
    #[must_use]
    pub fn duplicate(plugin_id: impl Into<String>) -> Self {
        Self::DuplicatePlugin {
            plugin_id: plugin_id.into(),
        }
    }

    /// Create an invalid plugin error
    #[must_use]
    pub fn invalid(
        plugin_id: impl Into<String>,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPlugin {
            plugin_id: plugin_id.into(),
            field,
            reason: reason.into(),
        }
    }

    /// Id of the plugin this error refers to
    #[must_use]
    pub fn plugin_id(&self) -> &str {
        match self {
            Self::DuplicatePlugin { plugin_id } | Self::InvalidPlugin { plugin_id, .. } => {
                plugin_id
            }
        }
    }
}
