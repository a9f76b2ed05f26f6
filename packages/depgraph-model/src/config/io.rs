//! Configuration I/O (YAML loading)

use super::validation::Validatable;
use super::{ConfigError, ConfigResult, GraphBuildConfig};
use serde::Serialize;
use serde_yaml::Value;
use std::path::Path;

/// Supported YAML schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1 (export form)
#[derive(Debug, Clone, Serialize)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    #[serde(flatten)]
    pub config: GraphBuildConfig,
}

impl GraphBuildConfig {
    /// Load and validate a YAML v1 file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML v1 content
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        let Value::Mapping(mut mapping) = value else {
            return Err(ConfigError::MissingVersion);
        };

        let version = mapping
            .remove("version")
            .ok_or(ConfigError::MissingVersion)?;
        let found = version.as_u64().unwrap_or(0);
        let supported = u32::try_from(found)
            .map(|v| SUPPORTED_VERSIONS.contains(&v))
            .unwrap_or(false);
        if !supported {
            return Err(ConfigError::UnsupportedVersion {
                found,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let valid_fields = Self::field_names();
        for key in mapping.keys() {
            let key = key.as_str().unwrap_or_default();
            if !valid_fields.iter().any(|f| f == key) {
                return Err(ConfigError::unknown_field_with_suggestion(
                    key,
                    "graph",
                    valid_fields,
                ));
            }
        }

        let config: GraphBuildConfig = serde_yaml::from_value(Value::Mapping(mapping))?;
        config.validate()?;
        Ok(config)
    }

    /// Export as YAML v1
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigFileV1 {
            version: 1,
            config: self.clone(),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}
