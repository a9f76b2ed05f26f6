//! Session-wide address → library registry

use super::GraphBuildMetrics;
use crate::shared::models::{Address, Library, LibraryMapSnapshot};
use ahash::AHashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Every library constructed during the session, keyed by address
///
/// Written only by the library cache on construction; read as an
/// immutable [`LibraryMapSnapshot`].
pub struct LibraryMap {
    libraries: RwLock<AHashMap<Address, Arc<Library>>>,
    metrics: Option<Arc<GraphBuildMetrics>>,
}

impl LibraryMap {
    pub fn new(metrics: Option<Arc<GraphBuildMetrics>>) -> Self {
        Self {
            libraries: RwLock::new(AHashMap::new()),
            metrics,
        }
    }

    pub(crate) fn register(&self, library: Arc<Library>) {
        let mut libraries = self.libraries.write();
        libraries.insert(library.address().clone(), library);
        if let Some(metrics) = &self.metrics {
            metrics.library_map_entries.set(libraries.len() as i64);
        }
    }

    pub fn get(&self, address: &str) -> Option<Arc<Library>> {
        self.libraries.read().get(address).cloned()
    }

    pub fn snapshot(&self) -> LibraryMapSnapshot {
        let libraries = self.libraries.read();
        LibraryMapSnapshot {
            libraries: libraries
                .iter()
                .map(|(address, library)| (address.to_string(), Library::clone(library)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.libraries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.read().is_empty()
    }

    pub fn clear(&self) {
        self.libraries.write().clear();
        if let Some(metrics) = &self.metrics {
            metrics.library_map_entries.set(0);
        }
    }
}
