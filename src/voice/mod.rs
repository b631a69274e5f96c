// ABOUTME: Voice feedback module: template substitution and the feedback injector
// ABOUTME: Turns plugin prompt and feedback templates into text spoken to the learner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

/// Proposal and confirmation rendering for registered plugins
pub mod injector;
/// Allow-listed `{name}` substitution
pub mod template;

pub use injector::VoiceFeedbackInjector;
pub use template::{render, TemplateVars};
