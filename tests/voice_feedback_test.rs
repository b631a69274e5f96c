// ABOUTME: Integration tests for the voice feedback injector
// ABOUTME: Covers proposal and confirmation rendering, safe substitution, and contextual triggers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{descriptor_with_triggers, echo_handler, init_test_logging, test_descriptor};
use serde_json::json;
use tutor_tools::errors::ToolError;
use tutor_tools::plugins::{
    ObjectSchema, PluginDescriptor, PluginRegistry, ToolCategory, VoicePromptConfig,
    VoiceTemplate,
};
use tutor_tools::tools::ToolContext;
use tutor_tools::voice::VoiceFeedbackInjector;

fn injector_with(descriptors: Vec<PluginDescriptor>) -> VoiceFeedbackInjector {
    init_test_logging();
    let registry = Arc::new(PluginRegistry::new());
    registry.register_all(descriptors).unwrap();
    VoiceFeedbackInjector::new(registry)
}

fn templated(
    id: &str,
    prompt: impl Into<VoiceTemplate>,
    feedback: impl Into<VoiceTemplate>,
) -> PluginDescriptor {
    PluginDescriptor::builder(id, "Test Tool", ToolCategory::Creation)
        .schema(Arc::new(ObjectSchema::new()))
        .handler(echo_handler())
        .voice_prompt(prompt)
        .voice_feedback(feedback)
        .triggers(["test"])
        .build()
        .unwrap()
}

fn context() -> ToolContext {
    ToolContext::new("conv-1", "user-1")
}

// ============================================================================
// Proposals
// ============================================================================

mod proposal_tests {
    use super::*;

    #[test]
    fn test_substitutes_tool_name_and_topic() {
        let injector = injector_with(vec![test_descriptor(
            "test_tool",
            "Test Tool",
            ToolCategory::Creation,
        )]);

        assert_eq!(
            injector.inject_proposal("test_tool", &context().with_topic("matematica")),
            "Vuoi creare Test Tool su matematica?"
        );
    }

    #[test]
    fn test_topic_defaults_when_missing() {
        let injector = injector_with(vec![test_descriptor(
            "test_tool",
            "Test Tool",
            ToolCategory::Creation,
        )]);

        assert_eq!(
            injector.inject_proposal("test_tool", &context()),
            "Vuoi creare Test Tool su this topic?"
        );
    }

    #[test]
    fn test_subject_defaults_when_missing() {
        let injector = injector_with(vec![templated(
            "test_tool",
            "Ripassiamo {subject}: {topic}",
            "Fatto",
        )]);

        assert_eq!(
            injector.inject_proposal("test_tool", &context()),
            "Ripassiamo this subject: this topic"
        );
        assert_eq!(
            injector.inject_proposal(
                "test_tool",
                &context().with_subject("storia").with_topic("Roma")
            ),
            "Ripassiamo storia: Roma"
        );
    }

    #[test]
    fn test_unknown_plugin_message() {
        let injector = injector_with(Vec::new());
        assert_eq!(
            injector.inject_proposal("nonexistent_tool", &context()),
            "Tool nonexistent_tool is not available."
        );
    }

    #[test]
    fn test_extension_fields_are_substituted() {
        let injector = injector_with(vec![templated(
            "test_tool",
            "Ciao {studentName}, {count} esercizi per {userId}",
            "Fatto",
        )]);
        let context = context()
            .with_extra("studentName", "Marco")
            .with_extra("count", 4);

        assert_eq!(
            injector.inject_proposal("test_tool", &context),
            "Ciao Marco, 4 esercizi per user-1"
        );
    }

    #[test]
    fn test_tool_name_cannot_be_overridden_by_context() {
        let injector = injector_with(vec![templated("test_tool", "Uso {toolName}", "Fatto")]);
        let context = context().with_extra("toolName", "Impostore");

        assert_eq!(injector.inject_proposal("test_tool", &context), "Uso Test Tool");
    }

    #[test]
    fn test_prototype_tokens_stay_verbatim() {
        let injector = injector_with(vec![templated(
            "test_tool",
            "Test {__proto__} and {constructor} and {toString}",
            "Fatto",
        )]);
        let context = context()
            .with_extra("__proto__", "polluted")
            .with_extra("constructor", "polluted");

        assert_eq!(
            injector.inject_proposal("test_tool", &context),
            "Test {__proto__} and {constructor} and {toString}"
        );
    }

    #[test]
    fn test_unknown_tokens_stay_verbatim() {
        let injector = injector_with(vec![templated(
            "test_tool",
            "Messaggio con {unknownVar}",
            "Fatto",
        )]);
        assert_eq!(
            injector.inject_proposal("test_tool", &context()),
            "Messaggio con {unknownVar}"
        );
    }

    #[test]
    fn test_config_template_ignores_fallback() {
        let injector = injector_with(vec![templated(
            "test_tool",
            VoicePromptConfig::new("Testo fisso")
                .requires_context(["topic"])
                .with_fallback("Testo di riserva"),
            "Fatto",
        )]);

        assert_eq!(injector.inject_proposal("test_tool", &context()), "Testo fisso");
    }

    #[test]
    fn test_non_scalar_extension_fields_are_not_substituted() {
        let injector = injector_with(vec![templated("test_tool", "Dati: {details}", "Fatto")]);
        let context = context().with_extra("details", json!({ "nested": true }));

        assert_eq!(injector.inject_proposal("test_tool", &context), "Dati: {details}");
    }
}

// ============================================================================
// Confirmations
// ============================================================================

mod confirmation_tests {
    use super::*;

    #[test]
    fn test_item_count_defaults_to_zero() {
        let injector = injector_with(vec![test_descriptor(
            "test_tool",
            "Test Tool",
            ToolCategory::Creation,
        )]);

        assert_eq!(
            injector.inject_confirmation("test_tool", &Ok(json!({ "success": true }))),
            "Ho creato Test Tool con 0 elementi"
        );
        assert_eq!(
            injector.inject_confirmation("test_tool", &Ok(json!(null))),
            "Ho creato Test Tool con 0 elementi"
        );
    }

    #[test]
    fn test_payload_fields_are_substituted() {
        let injector = injector_with(vec![templated(
            "test_tool",
            "Prompt",
            "Ho creato {title} con {itemCount} elementi",
        )]);
        let payload = json!({
            "title": "Le mie flashcard",
            "itemCount": 12,
            "cards": [1, 2, 3]
        });

        assert_eq!(
            injector.inject_confirmation("test_tool", &Ok(payload)),
            "Ho creato Le mie flashcard con 12 elementi"
        );
    }

    #[test]
    fn test_failure_exposes_error_fields() {
        let injector = injector_with(vec![templated(
            "test_tool",
            "Prompt",
            "Esito {success}: {errorMessage} ({errorCode})",
        )]);
        let result = Err(ToolError::execution_failed("Servizio non raggiungibile"));

        assert_eq!(
            injector.inject_confirmation("test_tool", &result),
            "Esito false: Servizio non raggiungibile (EXECUTION_FAILED)"
        );
    }

    #[test]
    fn test_unknown_plugin_message() {
        let injector = injector_with(Vec::new());
        assert_eq!(
            injector.inject_confirmation("ghost_tool", &Ok(json!({}))),
            "Tool ghost_tool execution completed."
        );
    }

    #[test]
    fn test_payload_cannot_override_tool_name_or_reserved_names() {
        let injector = injector_with(vec![templated(
            "test_tool",
            "Prompt",
            "{toolName} {constructor}",
        )]);
        let payload = json!({ "toolName": "Altro", "constructor": "x" });

        assert_eq!(
            injector.inject_confirmation("test_tool", &Ok(payload)),
            "Test Tool {constructor}"
        );
    }
}

// ============================================================================
// Contextual triggers
// ============================================================================

mod trigger_tests {
    use super::*;

    fn injector() -> VoiceFeedbackInjector {
        injector_with(vec![
            descriptor_with_triggers(
                "create_quiz",
                "Quiz",
                ToolCategory::Assessment,
                &["Matematica", "quiz"],
            ),
            descriptor_with_triggers(
                "create_timeline",
                "Linea del tempo",
                ToolCategory::Educational,
                &["storia"],
            ),
            descriptor_with_triggers(
                "create_flashcards",
                "Flashcard",
                ToolCategory::Educational,
                &["matematica", "memoria"],
            ),
        ])
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let ids = injector().contextual_triggers(&context().with_keywords(["matematica"]));
        assert_eq!(ids, vec!["create_quiz", "create_flashcards"]);
    }

    #[test]
    fn test_topic_is_matched() {
        let ids = injector().contextual_triggers(&context().with_topic("Storia"));
        assert_eq!(ids, vec!["create_timeline"]);
    }

    #[test]
    fn test_results_are_deduplicated_in_registration_order() {
        let ids = injector().contextual_triggers(
            &context()
                .with_keywords(["memoria", "QUIZ", "matematica"])
                .with_topic("storia"),
        );
        assert_eq!(ids, vec!["create_quiz", "create_timeline", "create_flashcards"]);
    }

    #[test]
    fn test_no_hints_no_matches() {
        let injector = injector();
        assert!(injector.contextual_triggers(&context()).is_empty());
        assert!(injector
            .contextual_triggers(&context().with_keywords(["geografia", "matematica avanzata"]))
            .is_empty());
    }
}
