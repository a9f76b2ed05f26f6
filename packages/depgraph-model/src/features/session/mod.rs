//! Graph build session
//!
//! Owns every cache of one model-build pass: the address interner and
//! coordinate cache, the library cache, the graph item cache and the
//! library map. Dropping the session ends the pass.

use crate::config::{GraphBuildConfig, Validatable};
use crate::errors::Result;
use crate::features::address::AddressComputer;
use crate::features::cache::{GraphBuildMetrics, GraphItemCache, LibraryCache, LibraryMap};
use crate::shared::models::{
    Address, ClasspathArtifact, DependencyNode, GraphItem, Library, LibraryMapSnapshot,
};
use prometheus::Registry;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

pub struct GraphBuildSession {
    id: Uuid,
    config: GraphBuildConfig,
    registry: Registry,
    metrics: Option<Arc<GraphBuildMetrics>>,
    addresses: AddressComputer,
    libraries: LibraryCache,
    graph_items: GraphItemCache,
    library_map: LibraryMap,
}

impl GraphBuildSession {
    /// Session with its own metrics registry
    pub fn new(config: GraphBuildConfig) -> Result<Self> {
        Self::with_registry(config, Registry::new())
    }

    /// Session registering its metrics (when enabled) into `registry`
    pub fn with_registry(config: GraphBuildConfig, registry: Registry) -> Result<Self> {
        config.validate()?;

        let metrics = if config.enable_metrics {
            Some(Arc::new(GraphBuildMetrics::new(&registry)?))
        } else {
            None
        };

        let session = Self {
            id: Uuid::new_v4(),
            addresses: AddressComputer::new(),
            libraries: LibraryCache::new(metrics.clone()),
            graph_items: GraphItemCache::new(metrics.clone()),
            library_map: LibraryMap::new(metrics.clone()),
            metrics,
            registry,
            config,
        };
        debug!(session = %session.id, "Graph build session started");
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &GraphBuildConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn metrics(&self) -> Option<&GraphBuildMetrics> {
        self.metrics.as_deref()
    }

    pub(crate) fn shared_metrics(&self) -> Option<Arc<GraphBuildMetrics>> {
        self.metrics.clone()
    }

    pub fn addresses(&self) -> &AddressComputer {
        &self.addresses
    }

    pub fn library_cache(&self) -> &LibraryCache {
        &self.libraries
    }

    pub fn graph_items(&self) -> &GraphItemCache {
        &self.graph_items
    }

    pub fn library_map(&self) -> &LibraryMap {
        &self.library_map
    }

    pub fn compute_address(&self, artifact: &ClasspathArtifact) -> Result<Address> {
        self.addresses.compute_address(artifact)
    }

    /// Library of an artifact, constructed and registered on first request
    pub fn library(&self, artifact: &ClasspathArtifact) -> Result<Arc<Library>> {
        self.libraries
            .get(artifact, &self.addresses, &self.library_map)
    }

    /// Graph item of a dependency-node tree
    pub fn graph_item(&self, node: &DependencyNode) -> Result<Arc<GraphItem>> {
        self.graph_items.get(node, self)
    }

    /// Immutable copy of the address → library registry
    pub fn global_lib_map(&self) -> LibraryMapSnapshot {
        self.library_map.snapshot()
    }

    /// Reset every cache; later requests construct fresh values
    pub fn clear_caches(&self) {
        self.graph_items.clear();
        self.libraries.clear();
        self.addresses.clear();
        self.library_map.clear();
        debug!(session = %self.id, "Session caches cleared");
    }
}
