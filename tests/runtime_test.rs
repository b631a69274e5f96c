// ABOUTME: Integration tests for the tool runtime conversation flow
// ABOUTME: Covers propose/suggest/confirm, the process-wide registry, and environment configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use common::{
    descriptor_with_triggers, init_test_logging, session_context, test_descriptor,
    trusted_context,
};
use serde_json::json;
use serial_test::serial;
use tutor_core::constants::env_keys;
use tutor_tools::config::{ExecutionConfig, RuntimeConfig};
use tutor_tools::errors::{ConfigError, ToolErrorCode};
use tutor_tools::plugins::{global_registry, PluginRegistry, ToolCategory};
use tutor_tools::runtime::ToolRuntime;
use tutor_tools::tools::ExecutionContext;

fn runtime() -> ToolRuntime {
    init_test_logging();
    let runtime = ToolRuntime::new(&RuntimeConfig::default());
    runtime
        .registry()
        .register_all(vec![
            descriptor_with_triggers(
                "create_quiz",
                "Quiz",
                ToolCategory::Assessment,
                &["quiz", "verifica"],
            ),
            test_descriptor("create_flashcards", "Flashcard", ToolCategory::Educational),
        ])
        .unwrap();
    runtime
}

fn clear_env() {
    env::remove_var(env_keys::HANDLER_TIMEOUT_MS);
    env::remove_var(env_keys::VALIDATE_ARGUMENTS);
    env::remove_var(env_keys::LOG_ARGUMENTS);
}

// ============================================================================
// Conversation flow
// ============================================================================

mod flow_tests {
    use super::*;

    #[test]
    fn test_components_share_one_registry() {
        let runtime = runtime();
        assert!(Arc::ptr_eq(
            runtime.registry(),
            runtime.orchestrator().registry()
        ));
        assert!(Arc::ptr_eq(runtime.registry(), runtime.injector().registry()));
    }

    #[test]
    fn test_suggest_then_propose() {
        let runtime = runtime();
        let context = session_context().with_keywords(["Verifica"]).with_topic("le frazioni");

        assert_eq!(runtime.suggest(&context), vec!["create_quiz"]);
        assert_eq!(
            runtime.propose("create_quiz", &context),
            "Vuoi creare Quiz su le frazioni?"
        );
    }

    #[tokio::test]
    async fn test_confirmed_execution_renders_feedback() {
        let runtime = runtime();

        let outcome = runtime
            .execute_confirmed("create_quiz", json!({ "questions": 3 }), &trusted_context())
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.result.as_ref().unwrap()["echo"], json!({ "questions": 3 }));
        assert_eq!(outcome.feedback, "Ho creato Quiz con 3 elementi");
    }

    #[tokio::test]
    async fn test_unknown_tool_still_gets_confirmation_text() {
        let runtime = runtime();

        let outcome = runtime
            .execute_confirmed("create_podcast", json!({}), &trusted_context())
            .await;

        assert!(!outcome.is_success());
        assert_eq!(
            outcome.result.unwrap_err().code,
            ToolErrorCode::PluginNotFound
        );
        assert_eq!(outcome.feedback, "Tool create_podcast execution completed.");
    }

    #[tokio::test]
    async fn test_rejected_execution_defaults_item_count() {
        let runtime = runtime();
        let no_session = ExecutionContext::new(session_context().with_session(" "));

        let outcome = runtime
            .execute_confirmed("create_flashcards", json!({}), &no_session)
            .await;

        assert_eq!(
            outcome.result.unwrap_err().code,
            ToolErrorCode::PrerequisitesNotMet
        );
        assert_eq!(outcome.feedback, "Ho creato Flashcard con 0 elementi");
    }
}

// ============================================================================
// Process-wide registry
// ============================================================================

mod global_registry_tests {
    use super::*;

    #[test]
    #[serial]
    fn test_global_registry_is_shared() {
        let registry = global_registry();
        registry.clear();

        registry
            .register(test_descriptor("global_tool", "Global", ToolCategory::Utility))
            .unwrap();
        let runtime = ToolRuntime::shared(ExecutionConfig::default());

        assert!(Arc::ptr_eq(&registry, runtime.registry()));
        assert!(runtime.registry().has("global_tool"));
        assert!(global_registry().has("global_tool"));

        registry.clear();
        assert!(runtime.registry().is_empty());
    }

    #[test]
    #[serial]
    fn test_local_registries_are_isolated_from_global() {
        global_registry().clear();
        let local = Arc::new(PluginRegistry::new());
        local
            .register(test_descriptor("local_tool", "Local", ToolCategory::Utility))
            .unwrap();

        let runtime = ToolRuntime::with_registry(local, ExecutionConfig::default());
        assert!(runtime.registry().has("local_tool"));
        assert!(!global_registry().has("local_tool"));
    }
}

// ============================================================================
// Environment configuration
// ============================================================================

mod config_tests {
    use super::*;

    #[test]
    #[serial]
    fn test_defaults_without_environment() {
        clear_env();
        let config = RuntimeConfig::from_env().unwrap();
        assert_eq!(config.execution, ExecutionConfig::default());
        assert_eq!(config.execution.handler_timeout, Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        clear_env();
        env::set_var(env_keys::HANDLER_TIMEOUT_MS, "1500");
        env::set_var(env_keys::VALIDATE_ARGUMENTS, "no");
        env::set_var(env_keys::LOG_ARGUMENTS, "1");

        let config = ExecutionConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.handler_timeout, Duration::from_millis(1500));
        assert!(!config.validate_arguments);
        assert!(config.log_arguments);
    }

    #[test]
    #[serial]
    fn test_malformed_values_are_rejected() {
        clear_env();
        env::set_var(env_keys::HANDLER_TIMEOUT_MS, "soon");
        let timeout = ToolRuntime::from_env();
        clear_env();

        env::set_var(env_keys::VALIDATE_ARGUMENTS, "maybe");
        let flag = ExecutionConfig::from_env();
        clear_env();

        assert!(matches!(timeout, Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(flag, Err(ConfigError::InvalidValue { .. })));
    }
}
