//! Per-variant dependency graph assembly

use super::artifacts::{collect_all_artifacts, runtime_component_ids};
use super::DependencyFailureHandler;
use crate::errors::Result;
use crate::features::session::GraphBuildSession;
use crate::shared::models::{
    Address, AndroidDependency, ClasspathArtifact, ComponentIdentifier, Dependencies,
    DependencyGraph, DependencyType, GraphItem, JavaDependency, MavenCoordinates,
    ProjectIdentifier, SyncIssue,
};
use crate::shared::ports::{ConsumedConfigType, VariantScope};
use crate::shared::utils::aar_layout::{find_local_jars_as_files, find_res_static_library};
use ahash::AHashSet;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Builds the dependency models of one or more variants
///
/// Resolution failures and source-download problems are collected rather
/// than returned; drain them with [`collect_issues`](Self::collect_issues)
/// after each call, whether it succeeded or not.
pub struct DependencyGraphAssembler {
    failures: DependencyFailureHandler,
    warnings: Mutex<Vec<SyncIssue>>,
}

impl DependencyGraphAssembler {
    pub fn new(session: &GraphBuildSession) -> Self {
        Self {
            failures: DependencyFailureHandler::with_metrics(session.shared_metrics()),
            warnings: Mutex::new(Vec::new()),
        }
    }

    pub fn failure_handler(&self) -> &DependencyFailureHandler {
        &self.failures
    }

    /// Dependency graph of one variant
    ///
    /// Simple mode lists the compile classpath flat, with provided
    /// libraries taken from the runtime jar query. Full mode also builds
    /// the runtime classpath; when the scope exposes a dependency-node tree
    /// for a classpath its items keep their transitive children.
    pub fn create_level2_dependency_graph(
        &self,
        session: &GraphBuildSession,
        scope: &dyn VariantScope,
        full: bool,
    ) -> Result<DependencyGraph> {
        let started = Instant::now();

        let compile_artifacts = collect_all_artifacts(
            scope,
            ConsumedConfigType::CompileClasspath,
            Some(&self.failures),
        );

        // Sources of the compile classpath only; runtime-only is not shown
        if session.config().download_sources {
            self.handle_sources(scope, &compile_artifacts);
        }

        let graph = if !full {
            let runtime_ids = runtime_component_ids(scope);

            let mut compile_dependencies = Vec::with_capacity(compile_artifacts.len());
            let mut provided_libraries = Vec::new();
            for artifact in &compile_artifacts {
                let item = flat_item(session, artifact)?;
                if !runtime_ids.contains(artifact.component()) {
                    provided_libraries.push(item.address.clone());
                }
                compile_dependencies.push(item);
            }

            DependencyGraph::Simple {
                compile_dependencies,
                provided_libraries,
            }
        } else {
            let compile_dependencies = classpath_items(
                session,
                scope,
                ConsumedConfigType::CompileClasspath,
                &compile_artifacts,
            )?;

            let runtime_artifacts = collect_all_artifacts(
                scope,
                ConsumedConfigType::RuntimeClasspath,
                Some(&self.failures),
            );
            let runtime_dependencies = classpath_items(
                session,
                scope,
                ConsumedConfigType::RuntimeClasspath,
                &runtime_artifacts,
            )?;

            let runtime_addresses: AHashSet<&Address> =
                runtime_dependencies.iter().map(|item| &item.address).collect();
            let provided_libraries = compile_dependencies
                .iter()
                .map(|item| &item.address)
                .filter(|address| !runtime_addresses.contains(address))
                .cloned()
                .collect();

            DependencyGraph::Full {
                compile_dependencies,
                runtime_dependencies,
                provided_libraries,
                // TODO: compute skipped libraries once the engine exposes substitutions
                skipped_libraries: Vec::new(),
            }
        };

        if let Some(metrics) = session.metrics() {
            metrics.variants_assembled.inc();
            metrics
                .assembly_latency
                .observe(started.elapsed().as_secs_f64());
        }
        info!(
            project = scope.project_path(),
            variant = scope.variant_name(),
            full,
            compile = graph.compile_dependencies().len(),
            provided = graph.provided_libraries().len(),
            "Dependency graph assembled"
        );

        Ok(graph)
    }

    /// Level-1 dependencies of the compile classpath
    pub fn create_dependencies(
        &self,
        session: &GraphBuildSession,
        scope: &dyn VariantScope,
    ) -> Result<Dependencies> {
        let runtime_ids = runtime_component_ids(scope);
        let artifacts = collect_all_artifacts(
            scope,
            ConsumedConfigType::CompileClasspath,
            Some(&self.failures),
        );

        let mut dependencies = Dependencies::default();
        for artifact in &artifacts {
            let is_provided = !runtime_ids.contains(artifact.component());

            let (mut build_id, mut project_path) = match artifact.component() {
                ComponentIdentifier::Project {
                    build,
                    project_path,
                } => (Some(build.name.clone()), Some(project_path.clone())),
                _ => (None, None),
            };

            match artifact.dependency_type() {
                DependencyType::Java => {
                    if let (Some(build_id), Some(project_path)) = (&build_id, &project_path) {
                        dependencies.projects.push(ProjectIdentifier {
                            build_id: build_id.clone(),
                            project_path: project_path.clone(),
                        });
                        continue;
                    }
                    dependencies.java_libraries.push(JavaDependency {
                        jar_file: artifact.file().to_path_buf(),
                        coordinates: coordinates(session, artifact)?,
                        is_provided,
                        is_skipped: false,
                    });
                }
                DependencyType::Android => {
                    if artifact.is_wrapped_module() {
                        // Reported as an external library
                        build_id = None;
                        project_path = None;
                    }
                    let folder = artifact.file();
                    dependencies.android_libraries.push(AndroidDependency {
                        coordinates: coordinates(session, artifact)?,
                        build_id,
                        project_path,
                        bundle: artifact.bundle().unwrap_or(folder).to_path_buf(),
                        folder: folder.to_path_buf(),
                        res_static_library: find_res_static_library(folder),
                        variant: artifact.variant().map(str::to_string),
                        is_provided,
                        is_skipped: false,
                        local_jars: find_local_jars_as_files(folder),
                    });
                }
            }
        }

        if session.config().download_sources {
            self.handle_sources(scope, &artifacts);
        }

        info!(
            project = scope.project_path(),
            variant = scope.variant_name(),
            android = dependencies.android_libraries.len(),
            java = dependencies.java_libraries.len(),
            projects = dependencies.projects.len(),
            "Level-1 dependencies assembled"
        );

        Ok(dependencies)
    }

    /// Drain collected resolution failures and warnings
    pub fn collect_issues(&self) -> Vec<SyncIssue> {
        let mut issues = self.failures.collect_issues();
        issues.append(&mut self.warnings.lock());
        issues
    }

    fn handle_sources(&self, scope: &dyn VariantScope, artifacts: &[ClasspathArtifact]) {
        let mut seen = AHashSet::with_capacity(artifacts.len());
        let ids: Vec<ComponentIdentifier> = artifacts
            .iter()
            .map(|artifact| artifact.component())
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect();

        if let Err(failure) = scope.resolve_sources(&ids) {
            warn!(error = %failure, "Unable to download sources/javadoc");
            self.warnings.lock().push(SyncIssue::warning(
                format!("Unable to download sources/javadoc: {}", failure),
                failure.causes.clone(),
            ));
        }
    }
}

/// Leaf item of an artifact; its library is constructed eagerly
fn flat_item(session: &GraphBuildSession, artifact: &ClasspathArtifact) -> Result<Arc<GraphItem>> {
    let address = session.compute_address(artifact)?;
    session.library(artifact)?;
    Ok(Arc::new(GraphItem::leaf(address)))
}

fn classpath_items(
    session: &GraphBuildSession,
    scope: &dyn VariantScope,
    config: ConsumedConfigType,
    artifacts: &[ClasspathArtifact],
) -> Result<Vec<Arc<GraphItem>>> {
    match scope.dependency_nodes(config) {
        Some(nodes) => session.graph_items().get_all(&nodes, artifacts, session),
        None => artifacts
            .iter()
            .map(|artifact| flat_item(session, artifact))
            .collect(),
    }
}

fn coordinates(
    session: &GraphBuildSession,
    artifact: &ClasspathArtifact,
) -> Result<MavenCoordinates> {
    let coordinates = session.addresses().maven_coordinates(artifact)?;
    Ok(coordinates.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphBuildConfig;
    use crate::shared::models::{ArtifactType, ResolvedArtifact};
    use crate::shared::ports::{ResolutionFailure, StaticVariantScope};

    fn jar(name: &str) -> ResolvedArtifact {
        ResolvedArtifact::new(
            format!("/m2/{}-1.jar", name),
            ComponentIdentifier::module("g", name, "1"),
            ArtifactType::Jar,
        )
    }

    fn session(config: GraphBuildConfig) -> GraphBuildSession {
        GraphBuildSession::new(config).unwrap()
    }

    #[test]
    fn test_simple_graph_provided() {
        let session = session(GraphBuildConfig::default());
        let scope = StaticVariantScope::new(":app", "debug")
            .with_compile(jar("x"))
            .with_both(jar("y"))
            .with_both(jar("z"));
        let assembler = DependencyGraphAssembler::new(&session);

        let graph = assembler
            .create_level2_dependency_graph(&session, &scope, false)
            .unwrap();

        assert!(!graph.is_full());
        assert_eq!(graph.compile_dependencies().len(), 3);
        let provided: Vec<&str> = graph.provided_libraries().iter().map(|a| a.as_str()).collect();
        assert_eq!(provided, vec!["g:x:1:jar"]);
        assert_eq!(session.global_lib_map().len(), 3);
    }

    #[test]
    fn test_source_download_failure_is_a_warning() {
        let session = session(GraphBuildConfig::default().download_sources(true));
        let mut scope = StaticVariantScope::new(":app", "debug").with_both(jar("x"));
        scope.source_failure = Some(ResolutionFailure::new("offline"));
        let assembler = DependencyGraphAssembler::new(&session);

        assembler
            .create_level2_dependency_graph(&session, &scope, false)
            .unwrap();

        let issues = assembler.collect_issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Unable to download sources/javadoc: offline");
        assert!(assembler.collect_issues().is_empty());
    }

    #[test]
    fn test_level1_splits_projects_and_libraries() {
        let session = session(GraphBuildConfig::default());
        let scope = StaticVariantScope::new(":app", "debug")
            .with_both(ResolvedArtifact::new(
                "/lib/classes.jar",
                ComponentIdentifier::project(":lib"),
                ArtifactType::Jar,
            ))
            .with_compile(jar("compile-only"));
        let assembler = DependencyGraphAssembler::new(&session);

        let dependencies = assembler.create_dependencies(&session, &scope).unwrap();

        assert_eq!(dependencies.projects.len(), 1);
        assert_eq!(dependencies.projects[0].project_path, ":lib");
        assert_eq!(dependencies.java_libraries.len(), 1);
        assert!(dependencies.java_libraries[0].is_provided);
        assert_eq!(
            dependencies.java_libraries[0].coordinates.to_string(),
            "g:compile-only:1:jar"
        );
        assert!(dependencies.android_libraries.is_empty());
    }
}
