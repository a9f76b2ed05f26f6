//! Shared models

mod address;
mod artifact;
mod coordinates;
mod dependencies;
mod dependency_node;
mod graph;
mod library;
mod output;
mod sync_issue;

pub use address::{Address, AddressInterner};
pub use artifact::{
    ArtifactKey, ArtifactType, BuildIdentifier, ClasspathArtifact, ComponentIdentifier,
    DependencyType, ResolvedArtifact, VariantAttributes, VARIANT_ATTRIBUTE,
};
pub use coordinates::{MavenCoordinates, LOCAL_AAR_GROUP_ID, UNSPECIFIED_VERSION};
pub use dependencies::{AndroidDependency, Dependencies, JavaDependency, ProjectIdentifier};
pub use dependency_node::{DependencyNode, NodeType};
pub use graph::{DependencyGraph, GraphItem};
pub use library::{AndroidLibrary, JavaLibrary, Library, LibraryMapSnapshot, ModuleLibrary};
pub use output::{OutputCandidates, OutputFile, OutputType};
pub use sync_issue::{IssueKind, Severity, SyncIssue};
