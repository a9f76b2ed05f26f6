//! Classpath artifact collection
//!
//! The jar query lists every dependency of a classpath. The manifest,
//! exploded-AAR and AAR queries then tell Android libraries from plain
//! jars, sub-projects from wrapped modules, and supply the exploded folder
//! and bundle of each Android library.

use super::DependencyFailureHandler;
use crate::shared::models::{
    ArtifactKey, ArtifactType, ClasspathArtifact, ComponentIdentifier, DependencyType,
    ResolvedArtifact,
};
use crate::shared::ports::{ArtifactScope, ConsumedConfigType, VariantScope};
use ahash::{AHashMap, AHashSet};

/// `<projectPath>@<variant>/<configName>`
pub fn configuration_name(scope: &dyn VariantScope, config: ConsumedConfigType) -> String {
    format!(
        "{}@{}/{}",
        scope.project_path(),
        scope.variant_name(),
        config.name()
    )
}

/// Merged, deduplicated artifacts of one classpath, in query order
///
/// Failures of the jar query are reported to `failures` when given.
pub fn collect_all_artifacts(
    scope: &dyn VariantScope,
    config: ConsumedConfigType,
    failures: Option<&DependencyFailureHandler>,
) -> Vec<ClasspathArtifact> {
    let jars = scope.artifact_collection(config, ArtifactScope::All, ArtifactType::Jar);
    let manifests = scope.artifact_collection(config, ArtifactScope::All, ArtifactType::Manifest);
    let non_namespaced_manifests =
        scope.artifact_collection(config, ArtifactScope::All, ArtifactType::NonNamespacedManifest);
    let exploded_aars =
        scope.artifact_collection(config, ArtifactScope::All, ArtifactType::ExplodedAar);
    let aars = scope.artifact_collection(config, ArtifactScope::External, ArtifactType::Aar);

    if let Some(handler) = failures {
        handler.add_errors(&configuration_name(scope, config), &jars.failures);
    }

    // Sub-projects publishing an exploded AAR are treated as external
    let mut wrapped_modules: AHashSet<&ComponentIdentifier> = AHashSet::new();
    let mut exploded_by_id: AHashMap<&ComponentIdentifier, &ResolvedArtifact> =
        AHashMap::with_capacity(exploded_aars.artifacts.len());
    for result in &exploded_aars.artifacts {
        if result.component.is_project() {
            wrapped_modules.insert(&result.component);
        }
        exploded_by_id.insert(&result.component, result);
    }

    let aar_by_id: AHashMap<&ComponentIdentifier, &ResolvedArtifact> = aars
        .artifacts
        .iter()
        .map(|result| (&result.component, result))
        .collect();

    let android_ids: AHashSet<&ComponentIdentifier> = manifests
        .artifacts
        .iter()
        .chain(non_namespaced_manifests.artifacts.iter())
        .map(|result| &result.component)
        .chain(exploded_by_id.keys().copied())
        .collect();

    let mut seen: AHashSet<ArtifactKey> = AHashSet::with_capacity(jars.artifacts.len());
    let mut artifacts = Vec::with_capacity(jars.artifacts.len());

    for jar in &jars.artifacts {
        let component = &jar.component;
        let wrapped_module = wrapped_modules.contains(component);

        let merged = if android_ids.contains(component) {
            // Prefer the exploded folder; a sub-project without one keeps its jar
            let artifact = exploded_by_id
                .get(component)
                .map(|exploded| ResolvedArtifact::clone(exploded))
                .unwrap_or_else(|| jar.clone());
            let bundle = aar_by_id.get(component).map(|aar| aar.file.clone());
            ClasspathArtifact::new(artifact, DependencyType::Android, wrapped_module, bundle)
        } else {
            ClasspathArtifact::new(jar.clone(), DependencyType::Java, wrapped_module, None)
        };

        if seen.insert(merged.key().clone()) {
            artifacts.push(merged);
        }
    }

    artifacts
}

/// Component ids of the runtime jar query, without merging
pub fn runtime_component_ids(scope: &dyn VariantScope) -> AHashSet<ComponentIdentifier> {
    scope
        .artifact_collection(
            ConsumedConfigType::RuntimeClasspath,
            ArtifactScope::All,
            ArtifactType::Jar,
        )
        .artifacts
        .into_iter()
        .map(|result| result.component)
        .collect()
}
