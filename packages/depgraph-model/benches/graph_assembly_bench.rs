//! Graph assembly benchmarks
//!
//! - Cold: fresh session per iteration (every library constructed)
//! - Warm: one session reused (cache hits only)
//! - Tree: full graph from a wide dependency-node DAG

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use depgraph_model::shared::models::{ArtifactType, DependencyNode, NodeType};
use depgraph_model::shared::ports::{ConsumedConfigType, StaticVariantScope};
use depgraph_model::{
    ComponentIdentifier, DependencyGraphAssembler, GraphBuildConfig, GraphBuildSession,
    ResolvedArtifact,
};
use std::sync::Arc;

fn module_jar(i: usize) -> ResolvedArtifact {
    ResolvedArtifact::new(
        format!("/m2/com/example/lib{i}/1.0/lib{i}-1.0.jar"),
        ComponentIdentifier::module("com.example", format!("lib{i}"), "1.0"),
        ArtifactType::Jar,
    )
}

fn flat_scope(size: usize) -> StaticVariantScope {
    (0..size).fold(StaticVariantScope::new(":app", "debug"), |scope, i| {
        if i % 10 == 0 {
            scope.with_compile(module_jar(i))
        } else {
            scope.with_both(module_jar(i))
        }
    })
}

/// Layered DAG: every node of a layer depends on every node of the next
fn layered_scope(layers: usize, width: usize) -> StaticVariantScope {
    let mut next: Vec<Arc<DependencyNode>> = Vec::new();
    for layer in (0..layers).rev() {
        next = (0..width)
            .map(|w| {
                let node = DependencyNode::new(module_jar(layer * width + w), NodeType::Java);
                Arc::new(
                    next.iter()
                        .fold(node, |node, child| node.with_child(Arc::clone(child))),
                )
            })
            .collect();
    }

    StaticVariantScope::new(":app", "debug")
        .with_dependency_nodes(ConsumedConfigType::CompileClasspath, next.clone())
        .with_dependency_nodes(ConsumedConfigType::RuntimeClasspath, next)
}

fn new_session(full: bool) -> GraphBuildSession {
    GraphBuildSession::new(
        GraphBuildConfig::default()
            .full_dependencies(full)
            .max_graph_depth(64),
    )
    .unwrap()
}

fn bench_cold_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly_cold");

    for size in [100, 1_000] {
        let scope = flat_scope(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &scope, |b, scope| {
            b.iter_batched(
                || new_session(false),
                |session| {
                    let assembler = DependencyGraphAssembler::new(&session);
                    let graph = assembler
                        .create_level2_dependency_graph(&session, scope, false)
                        .unwrap();
                    black_box(graph)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_warm_assembly(c: &mut Criterion) {
    let scope = flat_scope(1_000);
    let session = new_session(false);
    let assembler = DependencyGraphAssembler::new(&session);
    assembler
        .create_level2_dependency_graph(&session, &scope, false)
        .unwrap();

    c.bench_function("assembly_warm_1000", |b| {
        b.iter(|| {
            let graph = assembler
                .create_level2_dependency_graph(&session, &scope, false)
                .unwrap();
            black_box(graph)
        });
    });
}

fn bench_tree_assembly(c: &mut Criterion) {
    let scope = layered_scope(8, 8);

    c.bench_function("assembly_tree_8x8", |b| {
        b.iter_batched(
            || new_session(true),
            |session| {
                let assembler = DependencyGraphAssembler::new(&session);
                let graph = assembler
                    .create_level2_dependency_graph(&session, &scope, true)
                    .unwrap();
                black_box(graph)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_cold_assembly,
    bench_warm_assembly,
    bench_tree_assembly
);
criterion_main!(benches);
