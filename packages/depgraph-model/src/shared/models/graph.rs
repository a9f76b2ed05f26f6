//! Per-variant dependency graph

use super::Address;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Node of a variant's dependency tree
///
/// Children are shared: a dependency reachable through several parents is
/// one `Arc<GraphItem>`, not several equal copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphItem {
    pub address: Address,
    #[serde(default)]
    pub dependencies: Vec<Arc<GraphItem>>,
}

impl GraphItem {
    pub fn new(address: Address, dependencies: Vec<Arc<GraphItem>>) -> Self {
        Self {
            address,
            dependencies,
        }
    }

    /// Item without children
    pub fn leaf(address: Address) -> Self {
        Self::new(address, Vec::new())
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Number of distinct nodes reachable from this item, itself included
    pub fn distinct_node_count(&self) -> usize {
        let mut seen: AHashSet<*const GraphItem> = AHashSet::new();
        let mut stack: Vec<&GraphItem> = vec![self];
        while let Some(item) = stack.pop() {
            if !seen.insert(item as *const GraphItem) {
                continue;
            }
            stack.extend(item.dependencies.iter().map(|child| child.as_ref()));
        }
        seen.len()
    }
}

/// Dependency graph of one variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DependencyGraph {
    /// Compile classpath only, flat
    Simple {
        compile_dependencies: Vec<Arc<GraphItem>>,
        provided_libraries: Vec<Address>,
    },
    /// Compile and runtime classpaths
    Full {
        compile_dependencies: Vec<Arc<GraphItem>>,
        runtime_dependencies: Vec<Arc<GraphItem>>,
        provided_libraries: Vec<Address>,
        /// Always empty: skip resolution is not computed
        skipped_libraries: Vec<Address>,
    },
}

impl DependencyGraph {
    pub fn compile_dependencies(&self) -> &[Arc<GraphItem>] {
        match self {
            DependencyGraph::Simple {
                compile_dependencies,
                ..
            }
            | DependencyGraph::Full {
                compile_dependencies,
                ..
            } => compile_dependencies,
        }
    }

    /// The simple graph does not separate classpaths; it reports the compile items
    pub fn runtime_dependencies(&self) -> &[Arc<GraphItem>] {
        match self {
            DependencyGraph::Simple {
                compile_dependencies,
                ..
            } => compile_dependencies,
            DependencyGraph::Full {
                runtime_dependencies,
                ..
            } => runtime_dependencies,
        }
    }

    pub fn provided_libraries(&self) -> &[Address] {
        match self {
            DependencyGraph::Simple {
                provided_libraries, ..
            }
            | DependencyGraph::Full {
                provided_libraries, ..
            } => provided_libraries,
        }
    }

    pub fn skipped_libraries(&self) -> &[Address] {
        match self {
            DependencyGraph::Simple { .. } => &[],
            DependencyGraph::Full {
                skipped_libraries, ..
            } => skipped_libraries,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, DependencyGraph::Full { .. })
    }
}
