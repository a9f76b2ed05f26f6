//! Snapshot-backed [`VariantScope`]
//!
//! Holds every artifact of a classpath with its type tag and answers
//! queries by filtering. Loaded from JSON by `model-dump`, built in code by
//! tests and benches.

use super::variant_scope::{
    ArtifactCollection, ArtifactScope, ConsumedConfigType, ResolutionFailure, VariantScope,
};
use crate::errors::Result;
use crate::shared::models::{
    ArtifactType, ComponentIdentifier, DependencyNode, OutputFile, ResolvedArtifact,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticClasspath {
    #[serde(default)]
    pub artifacts: Vec<ResolvedArtifact>,
    /// Reported by every query on this classpath
    #[serde(default)]
    pub failures: Vec<ResolutionFailure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_nodes: Option<Vec<Arc<DependencyNode>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticVariantScope {
    pub project_path: String,
    pub variant_name: String,
    #[serde(default)]
    pub compile: StaticClasspath,
    #[serde(default)]
    pub runtime: StaticClasspath,
    #[serde(default)]
    pub outputs: Vec<OutputFile>,
    /// Returned by `resolve_sources` when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_failure: Option<ResolutionFailure>,
}

impl StaticVariantScope {
    pub fn new(project_path: impl Into<String>, variant_name: impl Into<String>) -> Self {
        Self {
            project_path: project_path.into(),
            variant_name: variant_name.into(),
            ..Self::default()
        }
    }

    /// Load a JSON snapshot
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn classpath(&self, config: ConsumedConfigType) -> &StaticClasspath {
        match config {
            ConsumedConfigType::CompileClasspath => &self.compile,
            ConsumedConfigType::RuntimeClasspath => &self.runtime,
        }
    }

    pub fn classpath_mut(&mut self, config: ConsumedConfigType) -> &mut StaticClasspath {
        match config {
            ConsumedConfigType::CompileClasspath => &mut self.compile,
            ConsumedConfigType::RuntimeClasspath => &mut self.runtime,
        }
    }

    pub fn with_compile(mut self, artifact: ResolvedArtifact) -> Self {
        self.compile.artifacts.push(artifact);
        self
    }

    pub fn with_runtime(mut self, artifact: ResolvedArtifact) -> Self {
        self.runtime.artifacts.push(artifact);
        self
    }

    /// Same artifact on both classpaths
    pub fn with_both(self, artifact: ResolvedArtifact) -> Self {
        self.with_compile(artifact.clone()).with_runtime(artifact)
    }

    pub fn with_failure(mut self, config: ConsumedConfigType, failure: ResolutionFailure) -> Self {
        self.classpath_mut(config).failures.push(failure);
        self
    }

    pub fn with_dependency_nodes(
        mut self,
        config: ConsumedConfigType,
        nodes: Vec<Arc<DependencyNode>>,
    ) -> Self {
        self.classpath_mut(config).dependency_nodes = Some(nodes);
        self
    }

    pub fn with_output(mut self, output: OutputFile) -> Self {
        self.outputs.push(output);
        self
    }
}

impl VariantScope for StaticVariantScope {
    fn project_path(&self) -> &str {
        &self.project_path
    }

    fn variant_name(&self) -> &str {
        &self.variant_name
    }

    fn artifact_collection(
        &self,
        config: ConsumedConfigType,
        scope: ArtifactScope,
        artifact_type: ArtifactType,
    ) -> ArtifactCollection {
        let classpath = self.classpath(config);
        ArtifactCollection {
            artifacts: classpath
                .artifacts
                .iter()
                .filter(|a| a.artifact_type == artifact_type && scope.includes(&a.component))
                .cloned()
                .collect(),
            failures: classpath.failures.clone(),
        }
    }

    fn dependency_nodes(&self, config: ConsumedConfigType) -> Option<Vec<Arc<DependencyNode>>> {
        self.classpath(config).dependency_nodes.clone()
    }

    fn resolve_sources(
        &self,
        _components: &[ComponentIdentifier],
    ) -> std::result::Result<(), ResolutionFailure> {
        match &self.source_failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }

    fn outputs(&self) -> Vec<OutputFile> {
        self.outputs.clone()
    }
}
