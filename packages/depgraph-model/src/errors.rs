//! Error types for depgraph-model
//!
//! Fatal errors abort the current model-build invocation. Resolution
//! failures are not errors at this level: they are collected as
//! [`DependencyError`](crate::features::dependency_graph::DependencyError)
//! values and surfaced as sync issues.

use crate::config::ConfigError;
use thiserror::Error;

/// Main error type for depgraph-model operations
#[derive(Debug, Error)]
pub enum ModelError {
    /// Component identifier kind the engine does not know how to address
    #[error("Don't know how to handle component identifier '{display_name}' of type {type_name}")]
    UnsupportedComponent {
        display_name: String,
        type_name: String,
    },

    /// None of the candidate outputs is the main or full-split output
    #[error("No main output among {candidates} candidate output(s) of '{variant}'")]
    MissingMainOutput { variant: String, candidates: usize },

    /// The dependency-node input re-entered a node on the current path
    #[error("Cyclic dependency graph: {}", path.join(" -> "))]
    DependencyCycle { path: Vec<String> },

    /// The dependency-node input is deeper than the configured bound
    #[error("Dependency graph deeper than {max_depth} levels at '{address}'")]
    GraphTooDeep { address: String, max_depth: usize },

    /// Requested tooling model is not registered
    #[error("Unknown model '{0}'")]
    UnknownModel(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Metric registration error
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl ModelError {
    /// Create an unsupported-component error
    pub fn unsupported_component(
        display_name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        ModelError::UnsupportedComponent {
            display_name: display_name.into(),
            type_name: type_name.into(),
        }
    }

    /// Whether the error signals a contract violation by the build engine
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            ModelError::UnsupportedComponent { .. }
                | ModelError::MissingMainOutput { .. }
                | ModelError::DependencyCycle { .. }
        )
    }
}

/// Result type alias for depgraph-model operations
pub type Result<T> = std::result::Result<T, ModelError>;
