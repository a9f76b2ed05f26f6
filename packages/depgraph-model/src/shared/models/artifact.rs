//! Build-engine artifact inputs and their content keys

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Attribute key carrying the producing variant of a sub-project artifact
pub const VARIANT_ATTRIBUTE: &str = "com.android.build.gradle.internal.dependency.VariantAttr";

/// Build a project component belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildIdentifier {
    pub name: String,
    #[serde(default = "default_true")]
    pub is_current_build: bool,
}

fn default_true() -> bool {
    true
}

impl BuildIdentifier {
    pub fn current() -> Self {
        Self {
            name: ":".to_string(),
            is_current_build: true,
        }
    }

    pub fn included(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_current_build: false,
        }
    }
}

/// Identity of the component an artifact was resolved from
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentIdentifier {
    /// Sub-project of the (possibly composite) build
    Project {
        #[serde(default = "BuildIdentifier::current")]
        build: BuildIdentifier,
        project_path: String,
    },
    /// External module from a repository
    Module {
        group: String,
        module: String,
        version: String,
    },
    /// File dependency (flat jar, local aar directory)
    Opaque { display_name: String },
    /// Any identifier kind this engine cannot address
    Other {
        type_name: String,
        display_name: String,
    },
}

impl ComponentIdentifier {
    pub fn project(project_path: impl Into<String>) -> Self {
        ComponentIdentifier::Project {
            build: BuildIdentifier::current(),
            project_path: project_path.into(),
        }
    }

    pub fn module(
        group: impl Into<String>,
        module: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        ComponentIdentifier::Module {
            group: group.into(),
            module: module.into(),
            version: version.into(),
        }
    }

    pub fn opaque(display_name: impl Into<String>) -> Self {
        ComponentIdentifier::Opaque {
            display_name: display_name.into(),
        }
    }

    pub fn is_project(&self) -> bool {
        matches!(self, ComponentIdentifier::Project { .. })
    }

    pub fn project_path(&self) -> Option<&str> {
        match self {
            ComponentIdentifier::Project { project_path, .. } => Some(project_path),
            _ => None,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            ComponentIdentifier::Project { project_path, build } => {
                if build.is_current_build {
                    format!("project {}", project_path)
                } else {
                    format!("project :{}{}", build.name, project_path)
                }
            }
            ComponentIdentifier::Module {
                group,
                module,
                version,
            } => format!("{}:{}:{}", group, module, version),
            ComponentIdentifier::Opaque { display_name } => display_name.clone(),
            ComponentIdentifier::Other { display_name, .. } => display_name.clone(),
        }
    }

    /// Identifier kind, as named in error messages
    pub fn type_name(&self) -> &str {
        match self {
            ComponentIdentifier::Project { .. } => "ProjectComponentIdentifier",
            ComponentIdentifier::Module { .. } => "ModuleComponentIdentifier",
            ComponentIdentifier::Opaque { .. } => "OpaqueComponentArtifactIdentifier",
            ComponentIdentifier::Other { type_name, .. } => type_name,
        }
    }
}

impl fmt::Display for ComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Resolved-variant attribute bag
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantAttributes(BTreeMap<String, String>);

impl VariantAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variant(variant: impl Into<String>) -> Self {
        let mut attributes = Self::new();
        attributes.insert(VARIANT_ATTRIBUTE, variant);
        attributes
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Name of the producing build variant, if the attribute is present
    pub fn variant_name(&self) -> Option<&str> {
        self.get(VARIANT_ATTRIBUTE)
    }
}

/// Artifact type requested from an artifact view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactType {
    Jar,
    ExplodedAar,
    Aar,
    Manifest,
    NonNamespacedManifest,
}

/// One result of an artifact query
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedArtifact {
    pub file: PathBuf,
    pub component: ComponentIdentifier,
    #[serde(default)]
    pub attributes: VariantAttributes,
    pub artifact_type: ArtifactType,
}

impl ResolvedArtifact {
    pub fn new(
        file: impl Into<PathBuf>,
        component: ComponentIdentifier,
        artifact_type: ArtifactType,
    ) -> Self {
        Self {
            file: file.into(),
            component,
            attributes: VariantAttributes::new(),
            artifact_type,
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.attributes.insert(VARIANT_ATTRIBUTE, variant);
        self
    }

    pub fn variant(&self) -> Option<&str> {
        self.attributes.variant_name()
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// Java jar or Android library dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyType {
    Java,
    Android,
}

impl DependencyType {
    /// Packaging extension
    pub fn extension(&self) -> &'static str {
        match self {
            DependencyType::Java => "jar",
            DependencyType::Android => "aar",
        }
    }
}

/// Content key of a classpath artifact
///
/// Everything that makes two artifact results the same logical dependency.
/// Computed once per merged artifact and used for dedup and every cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactKey {
    pub component: ComponentIdentifier,
    pub variant: Option<String>,
    pub file: PathBuf,
    pub artifact_type: ArtifactType,
    pub dependency_type: DependencyType,
    pub wrapped_module: bool,
}

/// Artifact of a classpath after jar/manifest/aar merging
#[derive(Debug, Clone)]
pub struct ClasspathArtifact {
    artifact: ResolvedArtifact,
    dependency_type: DependencyType,
    wrapped_module: bool,
    /// Packaged `.aar` when `artifact` is the exploded folder
    bundle: Option<PathBuf>,
    key: ArtifactKey,
}

impl ClasspathArtifact {
    pub fn new(
        artifact: ResolvedArtifact,
        dependency_type: DependencyType,
        wrapped_module: bool,
        bundle: Option<PathBuf>,
    ) -> Self {
        let key = ArtifactKey {
            component: artifact.component.clone(),
            variant: artifact.variant().map(str::to_string),
            file: artifact.file.clone(),
            artifact_type: artifact.artifact_type,
            dependency_type,
            wrapped_module,
        };
        Self {
            artifact,
            dependency_type,
            wrapped_module,
            bundle,
            key,
        }
    }

    /// Plain jar dependency
    pub fn java(artifact: ResolvedArtifact) -> Self {
        Self::new(artifact, DependencyType::Java, false, None)
    }

    /// Android dependency (exploded folder, optional bundle)
    pub fn android(artifact: ResolvedArtifact, bundle: Option<PathBuf>) -> Self {
        Self::new(artifact, DependencyType::Android, false, bundle)
    }

    pub fn artifact(&self) -> &ResolvedArtifact {
        &self.artifact
    }

    pub fn component(&self) -> &ComponentIdentifier {
        &self.artifact.component
    }

    pub fn file(&self) -> &Path {
        &self.artifact.file
    }

    pub fn variant(&self) -> Option<&str> {
        self.artifact.variant()
    }

    pub fn dependency_type(&self) -> DependencyType {
        self.dependency_type
    }

    pub fn is_wrapped_module(&self) -> bool {
        self.wrapped_module
    }

    pub fn bundle(&self) -> Option<&Path> {
        self.bundle.as_deref()
    }

    pub fn key(&self) -> &ArtifactKey {
        &self.key
    }

    /// Sub-project that is not wrapped as an external AAR
    pub fn is_sub_project(&self) -> bool {
        self.artifact.component.is_project() && !self.wrapped_module
    }
}

impl PartialEq for ClasspathArtifact {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ClasspathArtifact {}

impl std::hash::Hash for ClasspathArtifact {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_attribute_lookup() {
        let artifact = ResolvedArtifact::new(
            "/build/lib/classes.jar",
            ComponentIdentifier::project(":lib"),
            ArtifactType::Jar,
        )
        .with_variant("debug");

        assert_eq!(artifact.variant(), Some("debug"));
        assert!(artifact.component.is_project());
    }

    #[test]
    fn test_same_content_same_key() {
        let a = ClasspathArtifact::java(ResolvedArtifact::new(
            "/m2/a-1.0.jar",
            ComponentIdentifier::module("com.a", "a", "1.0"),
            ArtifactType::Jar,
        ));
        let b = ClasspathArtifact::java(ResolvedArtifact::new(
            "/m2/a-1.0.jar",
            ComponentIdentifier::module("com.a", "a", "1.0"),
            ArtifactType::Jar,
        ));

        assert_eq!(a.key(), b.key());
        assert_eq!(a, b);
    }

    #[test]
    fn test_dependency_type_is_part_of_key() {
        let artifact = ResolvedArtifact::new(
            "/m2/a-1.0",
            ComponentIdentifier::module("com.a", "a", "1.0"),
            ArtifactType::ExplodedAar,
        );
        let java = ClasspathArtifact::java(artifact.clone());
        let android = ClasspathArtifact::android(artifact, None);

        assert_ne!(java.key(), android.key());
    }

    #[test]
    fn test_component_serde_tagging() {
        let json = r#"{"kind":"module","group":"g","module":"m","version":"1"}"#;
        let id: ComponentIdentifier = serde_json::from_str(json).unwrap();
        assert_eq!(id, ComponentIdentifier::module("g", "m", "1"));

        let json = r#"{"kind":"project","project_path":":lib"}"#;
        let id: ComponentIdentifier = serde_json::from_str(json).unwrap();
        assert_eq!(id, ComponentIdentifier::project(":lib"));
    }

    #[test]
    fn test_wrapped_project_is_not_sub_project() {
        let artifact = ResolvedArtifact::new(
            "/build/wrapped",
            ComponentIdentifier::project(":wrapped"),
            ArtifactType::ExplodedAar,
        );
        let wrapped = ClasspathArtifact::new(artifact, DependencyType::Android, true, None);
        assert!(!wrapped.is_sub_project());
    }
}
