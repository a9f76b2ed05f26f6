//! Resolved-artifact queries of one build variant

use crate::shared::models::{
    ArtifactType, ComponentIdentifier, DependencyNode, OutputFile, ResolvedArtifact,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Classpath a query resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumedConfigType {
    CompileClasspath,
    RuntimeClasspath,
}

impl ConsumedConfigType {
    pub fn name(&self) -> &'static str {
        match self {
            ConsumedConfigType::CompileClasspath => "compileClasspath",
            ConsumedConfigType::RuntimeClasspath => "runtimeClasspath",
        }
    }
}

/// Which components a query covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactScope {
    All,
    /// Repository and file dependencies only
    External,
    /// Sub-projects only
    Module,
}

impl ArtifactScope {
    pub fn includes(&self, component: &ComponentIdentifier) -> bool {
        match self {
            ArtifactScope::All => true,
            ArtifactScope::External => !component.is_project(),
            ArtifactScope::Module => component.is_project(),
        }
    }
}

/// Resolution failure as reported by the build engine
///
/// `message` is the top-level failure, `causes` its cause chain outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionFailure {
    pub message: String,
    #[serde(default)]
    pub causes: Vec<String>,
}

impl ResolutionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            causes: Vec::new(),
        }
    }

    pub fn caused_by(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Message then every cause
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.message.as_str()).chain(self.causes.iter().map(String::as_str))
    }
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ResolutionFailure {}

/// Result of one artifact query, in resolution order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactCollection {
    #[serde(default)]
    pub artifacts: Vec<ResolvedArtifact>,
    #[serde(default)]
    pub failures: Vec<ResolutionFailure>,
}

impl ArtifactCollection {
    pub fn new(artifacts: Vec<ResolvedArtifact>) -> Self {
        Self {
            artifacts,
            failures: Vec::new(),
        }
    }

    pub fn with_failure(mut self, failure: ResolutionFailure) -> Self {
        self.failures.push(failure);
        self
    }
}

/// Build engine view of one variant
///
/// Implementations answer from already-resolved state; calls are expected to
/// be cheap and may come from several threads at once.
pub trait VariantScope: Send + Sync {
    /// Gradle-style path of the owning project (e.g. `:app`)
    fn project_path(&self) -> &str;

    /// Full variant name (e.g. `freeDebug`)
    fn variant_name(&self) -> &str;

    /// Artifacts of `artifact_type` on the given classpath
    fn artifact_collection(
        &self,
        config: ConsumedConfigType,
        scope: ArtifactScope,
        artifact_type: ArtifactType,
    ) -> ArtifactCollection;

    /// Resolution tree of the legacy dependency container, when available
    fn dependency_nodes(&self, _config: ConsumedConfigType) -> Option<Vec<Arc<DependencyNode>>> {
        None
    }

    /// Fetch sources (falling back to javadoc) for the given components
    fn resolve_sources(
        &self,
        _components: &[ComponentIdentifier],
    ) -> Result<(), ResolutionFailure> {
        Ok(())
    }

    /// Candidate outputs of the variant
    fn outputs(&self) -> Vec<OutputFile> {
        Vec::new()
    }
}
