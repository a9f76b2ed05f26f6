//! Session configuration
//!
//! One [`GraphBuildConfig`] per [`GraphBuildSession`](crate::GraphBuildSession).
//! Defaults match what the IDE asks for on a plain sync; a YAML v1 file can
//! override any field:
//!
//! ```yaml
//! version: 1
//! full_dependencies: true
//! download_sources: false
//! max_graph_depth: 256
//! enable_metrics: true
//! ```

pub mod error;
pub mod io;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
pub use validation::Validatable;

use serde::{Deserialize, Serialize};

/// Upper bound accepted for `max_graph_depth`
///
/// Node and item chains are still dropped recursively, so the bound stays
/// well inside a default thread stack.
pub const MAX_GRAPH_DEPTH_LIMIT: usize = 1_024;

/// Settings for one model-build pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphBuildConfig {
    /// Build compile + runtime graphs instead of the compile-only simple graph
    pub full_dependencies: bool,

    /// Ask the build engine to fetch sources/javadoc for compile dependencies
    pub download_sources: bool,

    /// Maximum nesting accepted from dependency-node trees
    pub max_graph_depth: usize,

    /// Register prometheus counters for the session caches
    pub enable_metrics: bool,
}

impl Default for GraphBuildConfig {
    fn default() -> Self {
        Self {
            full_dependencies: false,
            download_sources: false,
            max_graph_depth: 512,
            enable_metrics: true,
        }
    }
}

impl GraphBuildConfig {
    /// Builder-style toggle for full dependency graphs
    pub fn full_dependencies(mut self, enabled: bool) -> Self {
        self.full_dependencies = enabled;
        self
    }

    /// Builder-style toggle for source downloads
    pub fn download_sources(mut self, enabled: bool) -> Self {
        self.download_sources = enabled;
        self
    }

    /// Builder-style depth bound
    pub fn max_graph_depth(mut self, depth: usize) -> Self {
        self.max_graph_depth = depth;
        self
    }

    /// Field names accepted in YAML (besides `version`)
    pub fn field_names() -> Vec<String> {
        ["full_dependencies", "download_sources", "max_graph_depth", "enable_metrics"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

impl Validatable for GraphBuildConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_graph_depth == 0 || self.max_graph_depth > MAX_GRAPH_DEPTH_LIMIT {
            return Err(ConfigError::range_with_hint(
                "max_graph_depth",
                self.max_graph_depth,
                1,
                MAX_GRAPH_DEPTH_LIMIT,
                "Dependency trees deeper than this are rejected as malformed",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "GraphBuildConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GraphBuildConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.full_dependencies);
        assert_eq!(config.max_graph_depth, 512);
    }

    #[test]
    fn test_builder_overrides() {
        let config = GraphBuildConfig::default()
            .full_dependencies(true)
            .download_sources(true)
            .max_graph_depth(16);

        assert!(config.full_dependencies);
        assert!(config.download_sources);
        assert_eq!(config.max_graph_depth, 16);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = GraphBuildConfig::default()
            .max_graph_depth(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Range { .. }));
    }

    #[test]
    fn test_depth_above_limit_rejected() {
        let result = GraphBuildConfig::default()
            .max_graph_depth(MAX_GRAPH_DEPTH_LIMIT + 1)
            .validate();
        assert!(result.is_err());
    }
}
