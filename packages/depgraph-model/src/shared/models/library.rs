//! Library nodes of the dependency model

use super::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Reference to another sub-project of the build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleLibrary {
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_id: Option<String>,
    pub project_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

/// Packaged Android library, exploded on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidLibrary {
    pub address: Address,
    /// Bundle (`.aar`), or the exploded folder when no bundle was resolved
    pub artifact: PathBuf,
    pub folder: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub res_static_library: Option<PathBuf>,
    /// Relative to `folder`
    #[serde(default)]
    pub local_jars: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaLibrary {
    pub address: Address,
    pub artifact: PathBuf,
}

/// One resolved dependency of the final graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Library {
    Module(ModuleLibrary),
    Android(AndroidLibrary),
    Java(JavaLibrary),
}

impl Library {
    pub fn address(&self) -> &Address {
        match self {
            Library::Module(lib) => &lib.address,
            Library::Android(lib) => &lib.address,
            Library::Java(lib) => &lib.address,
        }
    }

    /// Artifact file; sub-project references have none
    pub fn artifact(&self) -> Option<&Path> {
        match self {
            Library::Module(_) => None,
            Library::Android(lib) => Some(&lib.artifact),
            Library::Java(lib) => Some(&lib.artifact),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Library::Module(_) => "module",
            Library::Android(_) => "android",
            Library::Java(_) => "java",
        }
    }
}

/// Immutable copy of a session's address → library registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryMapSnapshot {
    pub libraries: BTreeMap<String, Library>,
}

impl LibraryMapSnapshot {
    pub fn get(&self, address: &str) -> Option<&Library> {
        self.libraries.get(address)
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.libraries.contains_key(address)
    }
}
