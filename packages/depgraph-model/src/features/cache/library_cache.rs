//! Artifact → Library cache

use super::{GraphBuildMetrics, LibraryMap, MemoCache};
use crate::errors::Result;
use crate::features::address::AddressComputer;
use crate::shared::models::{
    AndroidLibrary, ArtifactKey, ClasspathArtifact, ComponentIdentifier, DependencyType,
    JavaLibrary, Library, ModuleLibrary,
};
use crate::shared::utils::aar_layout::{find_local_jars_as_strings, find_res_static_library};
use std::sync::Arc;
use tracing::debug;

/// Constructs each library at most once per artifact key
///
/// Every construction is registered into the session [`LibraryMap`] before
/// any caller can observe it.
pub struct LibraryCache {
    cells: MemoCache<ArtifactKey, Arc<Library>>,
    metrics: Option<Arc<GraphBuildMetrics>>,
}

impl LibraryCache {
    pub fn new(metrics: Option<Arc<GraphBuildMetrics>>) -> Self {
        Self {
            cells: MemoCache::new(),
            metrics,
        }
    }

    pub fn get(
        &self,
        artifact: &ClasspathArtifact,
        addresses: &AddressComputer,
        library_map: &LibraryMap,
    ) -> Result<Arc<Library>> {
        let mut constructed = false;
        let library = self.cells.get_or_try_init(artifact.key(), || {
            constructed = true;
            let library = Arc::new(create_library(artifact, addresses)?);
            library_map.register(Arc::clone(&library));
            debug!(address = %library.address(), kind = library.kind(), "Library constructed");
            Ok::<_, crate::errors::ModelError>(library)
        })?;

        if let Some(metrics) = &self.metrics {
            if constructed {
                metrics.library_constructions.inc();
            } else {
                metrics.library_hits.inc();
            }
        }

        Ok(library)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&self) {
        self.cells.clear();
    }
}

fn create_library(artifact: &ClasspathArtifact, addresses: &AddressComputer) -> Result<Library> {
    let address = addresses.compute_address(artifact)?;

    let library = match artifact.component() {
        ComponentIdentifier::Project {
            build,
            project_path,
        } if !artifact.is_wrapped_module() => Library::Module(ModuleLibrary {
            address,
            build_id: Some(build.name.clone()),
            project_path: project_path.clone(),
            variant: artifact.variant().map(str::to_string),
        }),
        _ => match artifact.dependency_type() {
            DependencyType::Java => Library::Java(JavaLibrary {
                address,
                artifact: artifact.file().to_path_buf(),
            }),
            DependencyType::Android => {
                let folder = artifact.file();
                Library::Android(AndroidLibrary {
                    address,
                    // Bundle may be absent; the folder keeps the field non-empty
                    artifact: artifact.bundle().unwrap_or(folder).to_path_buf(),
                    folder: folder.to_path_buf(),
                    res_static_library: find_res_static_library(folder),
                    local_jars: find_local_jars_as_strings(folder),
                })
            }
        },
    };

    Ok(library)
}
