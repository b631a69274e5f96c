// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, descriptor factories, handlers, and a stub search backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors
#![allow(
    dead_code,
    clippy::wildcard_in_or_patterns,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `tutor_tools`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::env;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::time::sleep;
use tracing::Level;
use tutor_tools::builtin::{SearchBackend, SearchError, SearchHit, WebSearchResponse};
use tutor_tools::errors::ToolError;
use tutor_tools::plugins::{ObjectSchema, PermissionSet, PluginDescriptor, ToolCategory};
use tutor_tools::tools::{ExecutionContext, FnHandler, PluginHandler, ToolContext, ToolResult};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            Ok("WARN" | "ERROR") | _ => Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Handler returning `{ "echo": args, "itemCount": 3 }`
pub fn echo_handler() -> Arc<dyn PluginHandler> {
    Arc::new(FnHandler::new(|args: Value, _ctx: ToolContext| async move {
        Ok::<_, ToolError>(json!({ "echo": args, "itemCount": 3 }))
    }))
}

/// Minimal valid descriptor with an open schema and echo handler
pub fn test_descriptor(id: &str, name: &str, category: ToolCategory) -> PluginDescriptor {
    descriptor_with_triggers(id, name, category, &["test"])
}

/// Valid descriptor with custom triggers
pub fn descriptor_with_triggers(
    id: &str,
    name: &str,
    category: ToolCategory,
    triggers: &[&str],
) -> PluginDescriptor {
    PluginDescriptor::builder(id, name, category)
        .schema(Arc::new(ObjectSchema::new()))
        .handler(echo_handler())
        .voice_prompt("Vuoi creare {toolName} su {topic}?")
        .voice_feedback("Ho creato {toolName} con {itemCount} elementi")
        .triggers(triggers.iter().copied())
        .build()
        .unwrap()
}

/// Context identifying a learner with an open session
pub fn session_context() -> ToolContext {
    ToolContext::new("conv-123", "user-456")
        .with_session("sess-789")
        .with_maestro("euclide")
}

/// Execution context with every permission granted
pub fn trusted_context() -> ExecutionContext {
    ExecutionContext::new(session_context()).with_permissions(PermissionSet::all())
}

/// Handler that sleeps before answering
pub fn slow_handler(delay: Duration) -> Arc<dyn PluginHandler> {
    Arc::new(FnHandler::new(move |_args: Value, _ctx: ToolContext| async move {
        sleep(delay).await;
        Ok::<_, ToolError>(json!({ "late": true }))
    }))
}

/// Scripted search backend recording the queries it receives
#[derive(Default)]
pub struct StubSearchBackend {
    pub web: Mutex<Option<Result<WebSearchResponse, SearchError>>>,
    pub videos: Mutex<Option<Result<Vec<SearchHit>, SearchError>>>,
    pub calls: Mutex<Vec<String>>,
}

impl StubSearchBackend {
    /// Backend returning one web hit from Wikipedia and one video
    pub fn with_hits() -> Self {
        let backend = Self::default();
        backend.set_web(Ok(WebSearchResponse {
            results: vec![SearchHit::web(
                "Wikipedia Result",
                "https://wikipedia.org/test",
            )],
            source: "wikipedia".to_owned(),
        }));
        backend.set_videos(Ok(vec![SearchHit::youtube(
            "YouTube Video",
            "https://youtube.com/watch?v=123",
        )]));
        backend
    }

    pub fn set_web(&self, response: Result<WebSearchResponse, SearchError>) {
        *self.web.lock().unwrap() = Some(response);
    }

    pub fn set_videos(&self, response: Result<Vec<SearchHit>, SearchError>) {
        *self.videos.lock().unwrap() = Some(response);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for StubSearchBackend {
    async fn web_search(&self, query: &str) -> Result<WebSearchResponse, SearchError> {
        self.calls.lock().unwrap().push(format!("web:{query}"));
        self.web
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(WebSearchResponse::default()))
    }

    async fn youtube_search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        self.calls.lock().unwrap().push(format!("youtube:{query}"));
        self.videos
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Unwrap a successful tool result
pub fn expect_ok(result: ToolResult<Value>) -> Value {
    match result {
        Ok(value) => value,
        Err(error) => panic!("expected success, got {error}"),
    }
}
