//! Custom assertions for dependency models

use depgraph_model::{DependencyGraph, GraphItem, SyncIssue};
use std::sync::Arc;

/// Addresses of top-level items, in order
pub fn addresses(items: &[Arc<GraphItem>]) -> Vec<String> {
    items.iter().map(|item| item.address.to_string()).collect()
}

pub fn assert_compile_addresses(graph: &DependencyGraph, expected: &[&str]) {
    assert_eq!(
        addresses(graph.compile_dependencies()),
        expected.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        "Unexpected compile dependencies"
    );
}

pub fn assert_provided(graph: &DependencyGraph, expected: &[&str]) {
    let provided: Vec<&str> = graph.provided_libraries().iter().map(|a| a.as_str()).collect();
    assert_eq!(provided, expected, "Unexpected provided libraries");
}

pub fn assert_single_unresolved(issues: &[SyncIssue], coordinate: &str) {
    assert_eq!(issues.len(), 1, "Expected exactly one issue, got: {:?}", issues);
    assert_eq!(
        issues[0].data.as_deref(),
        Some(coordinate),
        "Unexpected unresolved coordinate in {:?}",
        issues[0]
    );
}
