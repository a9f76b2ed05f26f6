//! Level-1 (legacy) dependency model

use super::MavenCoordinates;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sub-project on the compile classpath
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIdentifier {
    pub build_id: String,
    pub project_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaDependency {
    pub jar_file: PathBuf,
    pub coordinates: MavenCoordinates,
    pub is_provided: bool,
    pub is_skipped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidDependency {
    pub coordinates: MavenCoordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
    pub bundle: PathBuf,
    pub folder: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub res_static_library: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub is_provided: bool,
    pub is_skipped: bool,
    /// Absolute paths
    #[serde(default)]
    pub local_jars: Vec<PathBuf>,
}

/// Compile classpath of one variant, split by dependency kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependencies {
    pub android_libraries: Vec<AndroidDependency>,
    pub java_libraries: Vec<JavaDependency>,
    pub projects: Vec<ProjectIdentifier>,
}

impl Dependencies {
    pub fn is_empty(&self) -> bool {
        self.android_libraries.is_empty()
            && self.java_libraries.is_empty()
            && self.projects.is_empty()
    }
}
