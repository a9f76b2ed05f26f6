//! Address computation
//!
//! Every dependency of a graph is keyed by a string address:
//!
//! | component        | address                                           |
//! |------------------|---------------------------------------------------|
//! | sub-project      | `[build@@]projectPath[::variant]`                 |
//! | external module  | `group:module:version:packaging[:classifier]`     |
//! | file dependency  | `__local_aars__:<path>:unspecified:jar`           |
//!
//! Addresses are interned per session, so equal addresses share one
//! allocation and compare by pointer first.

use crate::errors::{ModelError, Result};
use crate::features::cache::MemoCache;
use crate::shared::models::{
    Address, AddressInterner, ArtifactKey, ClasspathArtifact, ComponentIdentifier,
    MavenCoordinates, UNSPECIFIED_VERSION,
};
use regex::Regex;
use std::sync::Arc;

/// Group used for the coordinates of a sub-project
pub const PROJECT_GROUP_ID: &str = "artifacts";

/// Separator between an included build's name and the project path
pub const BUILD_SEPARATOR: &str = "@@";

/// Separator between a project path and its variant
pub const VARIANT_SEPARATOR: &str = "::";

/// Computes and interns artifact addresses for one session
pub struct AddressComputer {
    interner: AddressInterner,
    coordinates: MemoCache<ArtifactKey, Arc<MavenCoordinates>>,
}

impl AddressComputer {
    pub fn new() -> Self {
        Self {
            interner: AddressInterner::new(),
            coordinates: MemoCache::new(),
        }
    }

    pub fn compute_address(&self, artifact: &ClasspathArtifact) -> Result<Address> {
        match artifact.component() {
            ComponentIdentifier::Project {
                build,
                project_path,
            } => {
                let mut address = String::with_capacity(100);
                if !build.is_current_build {
                    address.push_str(&build.name);
                    address.push_str(BUILD_SEPARATOR);
                }
                address.push_str(project_path);
                if let Some(variant) = artifact.variant() {
                    address.push_str(VARIANT_SEPARATOR);
                    address.push_str(variant);
                }
                Ok(self.interner.intern(address))
            }
            ComponentIdentifier::Module { .. } | ComponentIdentifier::Opaque { .. } => {
                let coordinates = self.maven_coordinates(artifact)?;
                Ok(self.interner.intern(coordinates.to_string()))
            }
            other => Err(ModelError::unsupported_component(
                other.display_name(),
                other.type_name(),
            )),
        }
    }

    /// Maven coordinates of an artifact, memoized per artifact key
    pub fn maven_coordinates(&self, artifact: &ClasspathArtifact) -> Result<Arc<MavenCoordinates>> {
        self.coordinates.get_or_try_init(artifact.key(), || {
            compute_maven_coordinates(artifact).map(Arc::new)
        })
    }

    /// Intern an already formatted address
    pub fn intern(&self, value: &str) -> Address {
        self.interner.intern(value)
    }

    pub fn interned_count(&self) -> usize {
        self.interner.len()
    }

    pub fn clear(&self) {
        self.coordinates.clear();
        self.interner.clear();
    }
}

fn compute_maven_coordinates(artifact: &ClasspathArtifact) -> Result<MavenCoordinates> {
    let extension = artifact.dependency_type().extension();
    match artifact.component() {
        ComponentIdentifier::Module {
            group,
            module,
            version,
        } => {
            let file = artifact.file();
            let classifier = if file.is_dir() {
                None
            } else {
                file.file_name().and_then(|name| {
                    extract_classifier(&name.to_string_lossy(), module, version, extension)
                })
            };
            Ok(MavenCoordinates::new(
                group.as_str(),
                module.as_str(),
                version.as_str(),
                extension,
                classifier,
            ))
        }
        ComponentIdentifier::Project { project_path, .. } => Ok(MavenCoordinates::new(
            PROJECT_GROUP_ID,
            project_path.as_str(),
            UNSPECIFIED_VERSION,
            "jar",
            None,
        )),
        ComponentIdentifier::Opaque { .. } => Ok(MavenCoordinates::local_file(artifact.file())),
        other => Err(ModelError::unsupported_component(
            other.display_name(),
            other.type_name(),
        )),
    }
}

/// Classifier of `<module>-<version>-<classifier>.<extension>`, if the name has that shape
pub fn extract_classifier(
    file_name: &str,
    module: &str,
    version: &str,
    extension: &str,
) -> Option<String> {
    let pattern = format!(
        r"^{}-{}-(.+)\.{}$",
        regex::escape(module),
        regex::escape(version),
        regex::escape(extension)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
