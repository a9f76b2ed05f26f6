//! Test fixture generators
//!
//! Resolved artifacts the way the build engine reports them, plus
//! exploded-AAR folders on disk.

use depgraph_model::shared::models::{ArtifactType, BuildIdentifier};
use depgraph_model::{ComponentIdentifier, ResolvedArtifact};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// External jar `group:name:version`
pub fn fixture_module_jar(group: &str, name: &str, version: &str) -> ResolvedArtifact {
    ResolvedArtifact::new(
        format!("/m2/{group}/{name}/{version}/{name}-{version}.jar"),
        ComponentIdentifier::module(group, name, version),
        ArtifactType::Jar,
    )
}

/// `com.example:<name>:1.0` jar
pub fn fixture_jar(name: &str) -> ResolvedArtifact {
    fixture_module_jar("com.example", name, "1.0")
}

/// Sub-project jar of `variant`
pub fn fixture_project_jar(project_path: &str, variant: &str) -> ResolvedArtifact {
    ResolvedArtifact::new(
        format!("/build{project_path}/intermediates/{variant}/classes.jar"),
        ComponentIdentifier::project(project_path),
        ArtifactType::Jar,
    )
    .with_variant(variant)
}

/// Sub-project jar of an included build
pub fn fixture_included_project_jar(build: &str, project_path: &str) -> ResolvedArtifact {
    ResolvedArtifact::new(
        format!("/{build}{project_path}/classes.jar"),
        ComponentIdentifier::Project {
            build: BuildIdentifier::included(build),
            project_path: project_path.to_string(),
        },
        ArtifactType::Jar,
    )
}

/// Flat file dependency
pub fn fixture_file_jar(path: &str) -> ResolvedArtifact {
    ResolvedArtifact::new(
        path,
        ComponentIdentifier::opaque(
            Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        ),
        ArtifactType::Jar,
    )
}

/// Exploded AAR folder with `res.apk` and the given local jars
pub fn fixture_exploded_aar(local_jars: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let libs = dir.path().join("jars").join("libs");
    fs::create_dir_all(&libs).expect("libs dir");
    for jar in local_jars {
        fs::write(libs.join(jar), b"").expect("local jar");
    }
    fs::write(dir.path().join("res.apk"), b"").expect("res.apk");
    dir
}
