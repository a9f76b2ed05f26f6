//! Maven-style coordinates

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Reserved group id for file-based dependencies
pub const LOCAL_AAR_GROUP_ID: &str = "__local_aars__";

/// Version used when the component carries none
pub const UNSPECIFIED_VERSION: &str = "unspecified";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MavenCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl MavenCoordinates {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        packaging: impl Into<String>,
        classifier: Option<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            packaging: packaging.into(),
            classifier,
        }
    }

    /// Synthesized coordinates of a file dependency
    pub fn local_file(file: &Path) -> Self {
        Self::new(
            LOCAL_AAR_GROUP_ID,
            file.to_string_lossy(),
            UNSPECIFIED_VERSION,
            "jar",
            None,
        )
    }

    /// `group:artifact` without version
    pub fn version_less_id(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

impl fmt::Display for MavenCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.version, self.packaging
        )?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_classifier() {
        let coords = MavenCoordinates::new("com.foo", "foo", "1.2.3", "jar", None);
        assert_eq!(coords.to_string(), "com.foo:foo:1.2.3:jar");
        assert_eq!(coords.version_less_id(), "com.foo:foo");
    }

    #[test]
    fn test_display_with_classifier() {
        let coords =
            MavenCoordinates::new("com.foo", "foo", "1.2.3", "jar", Some("sources".into()));
        assert_eq!(coords.to_string(), "com.foo:foo:1.2.3:jar:sources");
    }

    #[test]
    fn test_local_file_coordinates() {
        let coords = MavenCoordinates::local_file(Path::new("/libs/vendor.jar"));
        assert_eq!(coords.to_string(), "__local_aars__:/libs/vendor.jar:unspecified:jar");
    }
}
