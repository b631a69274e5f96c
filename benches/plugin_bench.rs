// ABOUTME: Criterion benchmarks for plugin lookup, voice template rendering, and tool execution
// ABOUTME: Measures trigger matching across registry sizes and the full orchestrated call path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! Criterion benchmarks for the plugin runtime.
//!
//! Covers the per-turn hot paths: trigger lookup, contextual suggestions,
//! template rendering and one orchestrated `create_mindmap` call.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use tokio::runtime::Runtime;
use tutor_tools::builtin::mindmap;
use tutor_tools::config::ExecutionConfig;
use tutor_tools::errors::ToolError;
use tutor_tools::plugins::{
    ObjectSchema, PermissionSet, PluginDescriptor, PluginRegistry, ToolCategory,
};
use tutor_tools::tools::{ExecutionContext, FnHandler, ToolContext, ToolOrchestrator};
use tutor_tools::voice::{render, TemplateVars, VoiceFeedbackInjector};

const REGISTRY_SIZES: [usize; 3] = [10, 100, 1_000];

fn registry_with(count: usize) -> Arc<PluginRegistry> {
    let registry = Arc::new(PluginRegistry::new());
    for index in 0..count {
        let descriptor = PluginDescriptor::builder(
            format!("tool_{index}"),
            format!("Tool {index}"),
            ToolCategory::all()[index % 5],
        )
        .schema(Arc::new(ObjectSchema::new()))
        .handler(Arc::new(FnHandler::new(|_args: Value, _ctx: ToolContext| async {
            Ok::<_, ToolError>(json!({}))
        })))
        .voice_prompt("Vuoi usare {toolName} su {topic}?")
        .voice_feedback("Fatto")
        .triggers([format!("argomento {index}"), format!("tema {}", index % 10)])
        .build()
        .unwrap();
        registry.register(descriptor).unwrap();
    }
    registry
}

fn bench_trigger_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("trigger_lookup");

    for size in REGISTRY_SIZES {
        let registry = registry_with(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("get_by_trigger", size), &registry, |b, r| {
            b.iter(|| black_box(r.get_by_trigger(black_box("TEMA 3"))));
        });
    }

    group.finish();
}

fn bench_contextual_triggers(c: &mut Criterion) {
    let mut group = c.benchmark_group("contextual_triggers");
    let context = ToolContext::new("conv", "user")
        .with_keywords(["tema 1", "tema 7", "geometria", "frazioni"])
        .with_topic("argomento 42");

    for size in REGISTRY_SIZES {
        let injector = VoiceFeedbackInjector::new(registry_with(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &injector, |b, injector| {
            b.iter(|| black_box(injector.contextual_triggers(black_box(&context))));
        });
    }

    group.finish();
}

fn bench_template_render(c: &mut Criterion) {
    let mut vars = TemplateVars::new();
    vars.insert("toolName", "Mappa Mentale");
    vars.insert("topic", "il ciclo dell'acqua");
    vars.insert("itemCount", "12");
    let template = "Ho creato {toolName} su {topic} con {itemCount} nodi, {unknown} resta.";

    c.bench_function("template_render", |b| {
        b.iter(|| black_box(render(black_box(template), &vars)));
    });
}

fn bench_orchestrated_mindmap(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let registry = Arc::new(PluginRegistry::new());
    registry.register(mindmap::descriptor().unwrap()).unwrap();
    let orchestrator = ToolOrchestrator::new(registry, ExecutionConfig::default());
    let context = ExecutionContext::new(ToolContext::new("conv", "user").with_session("sess"))
        .with_permissions(PermissionSet::WRITE_CONTENT);

    let nodes: Vec<Value> = (0..50)
        .map(|i| {
            let parent = if i == 0 { Value::Null } else { json!(format!("n{}", (i - 1) / 3)) };
            json!({ "id": format!("n{i}"), "label": format!("Nodo {i}"), "parentId": parent })
        })
        .collect();
    let args = json!({ "title": "Benchmark", "nodes": nodes });

    c.bench_function("execute_create_mindmap_50_nodes", |b| {
        b.iter(|| {
            rt.block_on(async {
                black_box(
                    orchestrator
                        .execute("create_mindmap", args.clone(), &context)
                        .await
                        .unwrap(),
                )
            })
        });
    });
}

criterion_group!(
    benches,
    bench_trigger_lookup,
    bench_contextual_triggers,
    bench_template_render,
    bench_orchestrated_mindmap
);
criterion_main!(benches);
