// ABOUTME: Main library entry point for the tutor tool plugin runtime
// ABOUTME: Registry, execution contract, voice feedback injection and built-in plugins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

#![deny(unsafe_code)]

//! # Tutor Tools
//!
//! Runtime for capabilities a tutor can invoke mid-conversation, such as
//! generating a mind map or searching for reference material.
//!
//! ## Architecture
//!
//! - **Plugins**: immutable descriptors stored in a concurrent registry,
//!   looked up by id, category, permission and trigger phrase
//! - **Tools**: the handler contract and the orchestrator that gates and
//!   times every call
//! - **Voice**: safe template substitution turning prompts and results into
//!   spoken text
//! - **Runtime**: one registry shared by the orchestrator and the injector
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use tutor_tools::builtin::{register_builtin_plugins, SearchBackend};
//! use tutor_tools::config::RuntimeConfig;
//! use tutor_tools::plugins::PermissionSet;
//! use tutor_tools::runtime::ToolRuntime;
//! use tutor_tools::tools::{ExecutionContext, ToolContext};
//!
//! async fn lesson(backend: Arc<dyn SearchBackend>) -> anyhow::Result<()> {
//!     let config = RuntimeConfig::from_env()?;
//!     config.logging.init()?;
//!
//!     let runtime = ToolRuntime::new(&config);
//!     register_builtin_plugins(runtime.registry(), backend)?;
//!
//!     let context = ToolContext::new("conv-1", "student-7")
//!         .with_session("session-3")
//!         .with_topic("il Rinascimento");
//!     println!("{}", runtime.propose("create_mindmap", &context));
//!
//!     let execution = ExecutionContext::new(context).with_permissions(PermissionSet::all());
//!     let outcome = runtime
//!         .execute_confirmed(
//!             "create_mindmap",
//!             json!({ "title": "Rinascimento", "nodes": [{ "label": "Arte" }] }),
//!             &execution,
//!         )
//!         .await;
//!     println!("{}", outcome.feedback);
//!     Ok(())
//! }
//! ```

/// Built-in plugins
pub mod builtin;

/// Environment-based configuration
pub mod config;

/// Structured logging setup and execution events
pub mod logging;

/// Plugin descriptors, schemas and the registry
pub mod plugins;

/// Application context tying registry, orchestrator and injector together
pub mod runtime;

/// Handler contract and execution orchestrator
pub mod tools;

/// Voice prompt and feedback rendering
pub mod voice;

pub use tutor_core::errors;
