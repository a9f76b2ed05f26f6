//! Prometheus metrics for the session caches

use crate::errors::Result;
use prometheus::{
    register_histogram_with_registry, register_int_counter_with_registry,
    register_int_gauge_with_registry, Histogram, HistogramOpts, IntCounter, IntGauge, Opts,
    Registry,
};

/// Counters of one graph build session
#[derive(Clone)]
pub struct GraphBuildMetrics {
    pub library_hits: IntCounter,
    pub library_constructions: IntCounter,
    pub graph_item_hits: IntCounter,
    pub graph_item_constructions: IntCounter,
    pub library_map_entries: IntGauge,
    pub dependency_failures: IntCounter,
    pub variants_assembled: IntCounter,
    pub assembly_latency: Histogram,
}

impl GraphBuildMetrics {
    pub fn new(registry: &Registry) -> Result<Self> {
        Ok(Self {
            library_hits: register_int_counter_with_registry!(
                Opts::new("depgraph_library_cache_hits_total", "Library cache hits"),
                registry
            )?,
            library_constructions: register_int_counter_with_registry!(
                Opts::new(
                    "depgraph_library_constructions_total",
                    "Libraries constructed"
                ),
                registry
            )?,
            graph_item_hits: register_int_counter_with_registry!(
                Opts::new("depgraph_graph_item_hits_total", "Graph item cache hits"),
                registry
            )?,
            graph_item_constructions: register_int_counter_with_registry!(
                Opts::new(
                    "depgraph_graph_item_constructions_total",
                    "Graph items constructed"
                ),
                registry
            )?,
            library_map_entries: register_int_gauge_with_registry!(
                Opts::new("depgraph_library_map_entries", "Libraries in the session map"),
                registry
            )?,
            dependency_failures: register_int_counter_with_registry!(
                Opts::new(
                    "depgraph_dependency_failures_total",
                    "Collected dependency resolution failures"
                ),
                registry
            )?,
            variants_assembled: register_int_counter_with_registry!(
                Opts::new("depgraph_variants_assembled_total", "Assembled variant graphs"),
                registry
            )?,
            assembly_latency: register_histogram_with_registry!(
                HistogramOpts::new(
                    "depgraph_assembly_latency_seconds",
                    "Per-variant graph assembly latency"
                )
                .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
                registry
            )?,
        })
    }

    pub fn library_hit_rate(&self) -> f64 {
        let hits = self.library_hits.get() as f64;
        let total = hits + self.library_constructions.get() as f64;
        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }
}
