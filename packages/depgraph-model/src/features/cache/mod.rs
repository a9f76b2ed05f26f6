//! Session caches
//!
//! - **MemoCache**: DashMap of per-key `OnceCell`s (at-most-once construction)
//! - **LibraryCache**: artifact key → `Library`, registers into the map
//! - **GraphItemCache**: dependency node → shared `GraphItem`
//! - **LibraryMap**: address → `Library`, `parking_lot::RwLock`
//! - **GraphBuildMetrics**: prometheus counters over all of the above

mod graph_item_cache;
mod library_cache;
mod library_map;
mod memo;
mod metrics;

pub use graph_item_cache::GraphItemCache;
pub use library_cache::LibraryCache;
pub use library_map::LibraryMap;
pub use memo::MemoCache;
pub use metrics::GraphBuildMetrics;
