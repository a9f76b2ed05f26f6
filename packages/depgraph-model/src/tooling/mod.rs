//! Tooling model dispatch
//!
//! The IDE requests models by name. Each request runs against one session
//! and any number of variant scopes and yields a serializable payload.

use crate::errors::{ModelError, Result};
use crate::features::dependency_graph::DependencyGraphAssembler;
use crate::features::session::GraphBuildSession;
use crate::shared::models::{
    Dependencies, DependencyGraph, LibraryMapSnapshot, OutputCandidates, OutputFile, SyncIssue,
};
use crate::shared::ports::VariantScope;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Models this crate can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    VariantDependencies,
    GlobalLibraryMap,
    LegacyDependencies,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [
        ModelKind::VariantDependencies,
        ModelKind::GlobalLibraryMap,
        ModelKind::LegacyDependencies,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::VariantDependencies => "VariantDependencies",
            ModelKind::GlobalLibraryMap => "GlobalLibraryMap",
            ModelKind::LegacyDependencies => "LegacyDependencies",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        ModelKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ModelError::UnknownModel(s.to_string()))
    }
}

/// Level-2 graph of one variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantDependencies {
    pub project_path: String,
    pub variant_name: String,
    pub graph: DependencyGraph,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_output: Option<OutputFile>,
}

/// Level-1 dependencies of one variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantLegacyDependencies {
    pub project_path: String,
    pub variant_name: String,
    pub dependencies: Dependencies,
}

/// Payload sent over the tooling transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "model")]
pub enum ToolingModel {
    VariantDependencies {
        variants: Vec<VariantDependencies>,
        issues: Vec<SyncIssue>,
    },
    GlobalLibraryMap(LibraryMapSnapshot),
    LegacyDependencies {
        variants: Vec<VariantLegacyDependencies>,
        issues: Vec<SyncIssue>,
    },
}

impl ToolingModel {
    pub fn kind(&self) -> ModelKind {
        match self {
            ToolingModel::VariantDependencies { .. } => ModelKind::VariantDependencies,
            ToolingModel::GlobalLibraryMap(_) => ModelKind::GlobalLibraryMap,
            ToolingModel::LegacyDependencies { .. } => ModelKind::LegacyDependencies,
        }
    }

    pub fn issues(&self) -> &[SyncIssue] {
        match self {
            ToolingModel::VariantDependencies { issues, .. }
            | ToolingModel::LegacyDependencies { issues, .. } => issues,
            ToolingModel::GlobalLibraryMap(_) => &[],
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Registry of buildable models
pub struct ModelRegistry {
    models: Vec<ModelKind>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            models: ModelKind::ALL.to_vec(),
        }
    }

    pub fn can_build(&self, model_name: &str) -> bool {
        model_name
            .parse::<ModelKind>()
            .map(|kind| self.models.contains(&kind))
            .unwrap_or(false)
    }

    pub fn model_names(&self) -> Vec<&'static str> {
        self.models.iter().map(ModelKind::name).collect()
    }

    /// Build `model_name` for every scope
    ///
    /// Variant graphs use `session.config().full_dependencies`. The library
    /// map reflects whatever the session has constructed so far.
    pub fn build_all(
        &self,
        model_name: &str,
        session: &GraphBuildSession,
        scopes: &[&dyn VariantScope],
    ) -> Result<ToolingModel> {
        let kind: ModelKind = model_name.parse()?;
        if !self.models.contains(&kind) {
            return Err(ModelError::UnknownModel(model_name.to_string()));
        }

        match kind {
            ModelKind::VariantDependencies => {
                let assembler = DependencyGraphAssembler::new(session);
                let full = session.config().full_dependencies;
                let mut variants = Vec::with_capacity(scopes.len());
                for scope in scopes {
                    let graph = assembler.create_level2_dependency_graph(session, *scope, full)?;
                    variants.push(VariantDependencies {
                        project_path: scope.project_path().to_string(),
                        variant_name: scope.variant_name().to_string(),
                        graph,
                        main_output: main_output(*scope)?,
                    });
                }
                Ok(ToolingModel::VariantDependencies {
                    variants,
                    issues: assembler.collect_issues(),
                })
            }
            ModelKind::GlobalLibraryMap => {
                Ok(ToolingModel::GlobalLibraryMap(session.global_lib_map()))
            }
            ModelKind::LegacyDependencies => {
                let assembler = DependencyGraphAssembler::new(session);
                let mut variants = Vec::with_capacity(scopes.len());
                for scope in scopes {
                    variants.push(VariantLegacyDependencies {
                        project_path: scope.project_path().to_string(),
                        variant_name: scope.variant_name().to_string(),
                        dependencies: assembler.create_dependencies(session, *scope)?,
                    });
                }
                Ok(ToolingModel::LegacyDependencies {
                    variants,
                    issues: assembler.collect_issues(),
                })
            }
        }
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Main output of a variant that reports outputs at all
fn main_output(scope: &dyn VariantScope) -> Result<Option<OutputFile>> {
    let outputs = scope.outputs();
    if outputs.is_empty() {
        return Ok(None);
    }
    let candidates = OutputCandidates::new(scope.variant_name(), outputs)?;
    Ok(Some(candidates.main_output().clone()))
}
