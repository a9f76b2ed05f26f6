//! Builders for variant scopes and sessions

use super::fixtures::fixture_module_jar;
use depgraph_model::shared::models::{ArtifactType, DependencyNode, NodeType};
use depgraph_model::shared::ports::StaticVariantScope;
use depgraph_model::{ComponentIdentifier, GraphBuildConfig, GraphBuildSession, ResolvedArtifact};
use std::path::Path;
use std::sync::Arc;

pub fn session() -> GraphBuildSession {
    GraphBuildSession::new(GraphBuildConfig::default()).expect("default config is valid")
}

pub fn full_session() -> GraphBuildSession {
    GraphBuildSession::new(GraphBuildConfig::default().full_dependencies(true))
        .expect("full config is valid")
}

/// Android library as reported by the five classpath queries
///
/// Jar + manifest + exploded folder on the given classpath(s), bundle
/// from the external AAR query.
pub struct AndroidLibraryBuilder {
    component: ComponentIdentifier,
    folder: String,
    bundle: Option<String>,
}

impl AndroidLibraryBuilder {
    pub fn module(group: &str, name: &str, version: &str, folder: &Path) -> Self {
        Self {
            component: ComponentIdentifier::module(group, name, version),
            folder: folder.to_string_lossy().into_owned(),
            bundle: Some(format!("/m2/{group}/{name}/{version}/{name}-{version}.aar")),
        }
    }

    pub fn wrapped_project(project_path: &str, folder: &Path) -> Self {
        Self {
            component: ComponentIdentifier::project(project_path),
            folder: folder.to_string_lossy().into_owned(),
            bundle: None,
        }
    }

    pub fn artifacts(&self) -> Vec<ResolvedArtifact> {
        let mut artifacts = vec![
            ResolvedArtifact::new(
                format!("{}/jars/classes.jar", self.folder),
                self.component.clone(),
                ArtifactType::Jar,
            ),
            ResolvedArtifact::new(
                format!("{}/AndroidManifest.xml", self.folder),
                self.component.clone(),
                ArtifactType::Manifest,
            ),
            ResolvedArtifact::new(
                self.folder.as_str(),
                self.component.clone(),
                ArtifactType::ExplodedAar,
            ),
        ];
        if let Some(bundle) = &self.bundle {
            artifacts.push(ResolvedArtifact::new(
                bundle.as_str(),
                self.component.clone(),
                ArtifactType::Aar,
            ));
        }
        artifacts
    }

    pub fn add_compile(&self, scope: StaticVariantScope) -> StaticVariantScope {
        self.artifacts()
            .into_iter()
            .fold(scope, |scope, artifact| scope.with_compile(artifact))
    }

    pub fn add_both(&self, scope: StaticVariantScope) -> StaticVariantScope {
        self.artifacts()
            .into_iter()
            .fold(scope, |scope, artifact| scope.with_both(artifact))
    }
}

/// `compile {X, Y, Z}`, `runtime {Y, Z}`
pub fn compile_only_x_scope() -> StaticVariantScope {
    StaticVariantScope::new(":app", "debug")
        .with_compile(fixture_module_jar("com.example", "x", "1.0"))
        .with_both(fixture_module_jar("com.example", "y", "1.0"))
        .with_both(fixture_module_jar("com.example", "z", "1.0"))
}

/// Scope of `size` external jars on both classpaths
pub fn flat_scope(variant: &str, size: usize) -> StaticVariantScope {
    (0..size).fold(StaticVariantScope::new(":app", variant), |scope, i| {
        scope.with_both(fixture_module_jar("com.example", &format!("lib{i}"), "1.0"))
    })
}

/// Java dependency node of `com.example:<name>:1.0`
pub fn java_node(name: &str, children: Vec<Arc<DependencyNode>>) -> Arc<DependencyNode> {
    let node = DependencyNode::new(fixture_module_jar("com.example", name, "1.0"), NodeType::Java);
    Arc::new(
        children
            .into_iter()
            .fold(node, |node, child| node.with_child(child)),
    )
}

/// Linear chain `chain0 -> chain1 -> ...` of `length` nodes
pub fn java_chain(length: usize) -> Arc<DependencyNode> {
    (0..length).rev().fold(None, |child: Option<Arc<DependencyNode>>, i| {
        let node = DependencyNode::new(
            fixture_module_jar("com.example", &format!("chain{i}"), "1.0"),
            NodeType::Java,
        );
        Some(Arc::new(match child {
            Some(child) => node.with_child(child),
            None => node,
        }))
    })
    .expect("chain length must be positive")
}
