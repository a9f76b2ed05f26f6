//! Session lifecycle: configuration, cache reset, model requests

mod common;

use common::*;
use depgraph_model::shared::models::ClasspathArtifact;
use depgraph_model::shared::ports::StaticVariantScope;
use depgraph_model::tooling::ModelKind;
use depgraph_model::{ConfigError, GraphBuildConfig, GraphBuildSession, ModelError, ModelRegistry};
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_config_from_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("depgraph.yaml");
    fs::write(
        &path,
        "version: 1\nfull_dependencies: true\ndownload_sources: true\nmax_graph_depth: 64\n",
    )
    .unwrap();

    let config = GraphBuildConfig::from_yaml(&path).unwrap();
    assert!(config.full_dependencies);
    assert!(config.download_sources);
    assert_eq!(config.max_graph_depth, 64);

    let session = GraphBuildSession::new(config).unwrap();
    assert!(session.config().full_dependencies);
}

#[test]
fn test_config_rejects_unknown_field() {
    let result = GraphBuildConfig::from_yaml_str("version: 1\nfull_dependencys: true\n");
    assert!(matches!(result, Err(ConfigError::UnknownField { .. })));
}

#[test]
fn test_clear_caches_between_passes() {
    let session = session();
    let artifact = ClasspathArtifact::java(fixture_jar("a"));

    let first = session.library(&artifact).unwrap();
    assert!(Arc::ptr_eq(&first, &session.library(&artifact).unwrap()));

    session.clear_caches();
    assert!(session.global_lib_map().is_empty());
    assert_eq!(session.addresses().interned_count(), 0);

    let second = session.library(&artifact).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
}

#[test]
fn test_library_map_accumulates_across_variants() {
    let session = session();
    let registry = ModelRegistry::new();
    let debug = flat_scope("debug", 3);
    let release = compile_only_x_scope();

    registry
        .build_all("VariantDependencies", &session, &[&debug, &release])
        .unwrap();
    let model = registry.build_all("GlobalLibraryMap", &session, &[]).unwrap();

    assert_eq!(model.kind(), ModelKind::GlobalLibraryMap);
    let json: serde_json::Value = serde_json::from_str(&model.to_json().unwrap()).unwrap();
    let mut addresses: Vec<&str> = json["libraries"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    addresses.sort();
    assert_eq!(
        addresses,
        vec![
            "com.example:lib0:1.0:jar",
            "com.example:lib1:1.0:jar",
            "com.example:lib2:1.0:jar",
            "com.example:x:1.0:jar",
            "com.example:y:1.0:jar",
            "com.example:z:1.0:jar",
        ]
    );
}

#[test]
fn test_scope_snapshot_round_trips_through_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app-debug.json");
    let scope = compile_only_x_scope();
    fs::write(&path, serde_json::to_string_pretty(&scope).unwrap()).unwrap();

    let loaded = StaticVariantScope::from_json_file(&path).unwrap();
    assert_eq!(loaded, scope);

    let session = session();
    let model = ModelRegistry::new()
        .build_all("VariantDependencies", &session, &[&loaded])
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&model.to_json().unwrap()).unwrap();
    assert_eq!(
        json["variants"][0]["graph"]["provided_libraries"],
        serde_json::json!(["com.example:x:1.0:jar"])
    );
}

#[test]
fn test_missing_snapshot_is_an_io_error() {
    let result = StaticVariantScope::from_json_file("/nonexistent/scope.json");
    assert!(matches!(result, Err(ModelError::Io(_))));
}

#[test]
fn test_legacy_dependencies_model() {
    let session = session();
    let scope = compile_only_x_scope().with_both(fixture_project_jar(":lib", "debug"));

    let model = ModelRegistry::new()
        .build_all("LegacyDependencies", &session, &[&scope])
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&model.to_json().unwrap()).unwrap();
    let dependencies = &json["variants"][0]["dependencies"];
    assert_eq!(dependencies["java_libraries"].as_array().unwrap().len(), 3);
    assert_eq!(dependencies["projects"][0]["project_path"], ":lib");
    assert!(model.issues().is_empty());
}
