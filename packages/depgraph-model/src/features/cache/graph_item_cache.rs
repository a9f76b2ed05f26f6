//! Dependency-node tree → GraphItem DAG

use super::{GraphBuildMetrics, MemoCache};
use crate::errors::{ModelError, Result};
use crate::features::session::GraphBuildSession;
use crate::shared::models::{
    ArtifactKey, ClasspathArtifact, ComponentIdentifier, DependencyNode, GraphItem,
};
use ahash::{AHashMap, AHashSet};
use std::sync::Arc;
use tracing::debug;

/// Identity of a graph item: its artifact plus its child items
///
/// Children are named by the address of their cached `Arc`; the cache keeps
/// every such item alive for as long as a key refers to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    artifact: ArtifactKey,
    children: Vec<usize>,
}

impl ItemKey {
    fn new(artifact: &ClasspathArtifact, children: &[Arc<GraphItem>]) -> Self {
        Self {
            artifact: artifact.key().clone(),
            children: children
                .iter()
                .map(|child| Arc::as_ptr(child) as usize)
                .collect(),
        }
    }
}

/// Classpath artifact of a node, taken from the merged classpath when the
/// component is on it (bundle, exploded folder, wrapped flag)
struct NodeArtifacts<'a> {
    merged: AHashMap<&'a ComponentIdentifier, &'a ClasspathArtifact>,
}

impl<'a> NodeArtifacts<'a> {
    fn new(merged: &'a [ClasspathArtifact]) -> Self {
        Self {
            merged: merged
                .iter()
                .map(|artifact| (artifact.component(), artifact))
                .collect(),
        }
    }

    fn resolve(&self, node: &DependencyNode) -> ClasspathArtifact {
        match self.merged.get(&node.artifact.component) {
            Some(artifact) => ClasspathArtifact::clone(artifact),
            None => node.classpath_artifact(),
        }
    }
}

/// Converts dependency-node trees into shared graph items
///
/// Two nodes share one `Arc<GraphItem>` when they have the same artifact and
/// their children convert to the same items, so a subtree reached through
/// several parents is built once while a node with extra children on another
/// classpath gets its own item. Each converted node also gets its library
/// constructed.
pub struct GraphItemCache {
    cells: MemoCache<ItemKey, Arc<GraphItem>>,
    metrics: Option<Arc<GraphBuildMetrics>>,
}

struct Frame<'n> {
    node: &'n DependencyNode,
    artifact: ClasspathArtifact,
    next_child: usize,
    children: Vec<Arc<GraphItem>>,
}

impl<'n> Frame<'n> {
    fn new(node: &'n DependencyNode, artifact: ClasspathArtifact) -> Self {
        Self {
            node,
            artifact,
            next_child: 0,
            children: Vec::with_capacity(node.children.len()),
        }
    }
}

type Visited = AHashMap<*const DependencyNode, Arc<GraphItem>>;

impl GraphItemCache {
    pub fn new(metrics: Option<Arc<GraphBuildMetrics>>) -> Self {
        Self {
            cells: MemoCache::new(),
            metrics,
        }
    }

    /// Item of a single tree, artifacts taken from the nodes themselves
    pub fn get(
        &self,
        node: &DependencyNode,
        session: &GraphBuildSession,
    ) -> Result<Arc<GraphItem>> {
        self.convert(node, &NodeArtifacts::new(&[]), &mut Visited::new(), session)
    }

    /// Items of every root of one classpath
    ///
    /// Nodes whose component appears in `merged` use that artifact, so their
    /// libraries match the ones built from the flat classpath.
    pub fn get_all(
        &self,
        roots: &[Arc<DependencyNode>],
        merged: &[ClasspathArtifact],
        session: &GraphBuildSession,
    ) -> Result<Vec<Arc<GraphItem>>> {
        let artifacts = NodeArtifacts::new(merged);
        let mut visited = Visited::new();
        roots
            .iter()
            .map(|root| self.convert(root, &artifacts, &mut visited, session))
            .collect()
    }

    /// Post-order walk with an explicit stack
    ///
    /// Rejects cycles and paths longer than `max_graph_depth`; no native
    /// recursion happens whatever the depth.
    fn convert(
        &self,
        root: &DependencyNode,
        artifacts: &NodeArtifacts<'_>,
        visited: &mut Visited,
        session: &GraphBuildSession,
    ) -> Result<Arc<GraphItem>> {
        if let Some(item) = visited.get(&(root as *const DependencyNode)) {
            self.record(false);
            return Ok(Arc::clone(item));
        }

        let max_depth = session.config().max_graph_depth;
        let root_artifact = artifacts.resolve(root);
        let mut on_path: AHashSet<ArtifactKey> = AHashSet::new();
        on_path.insert(root_artifact.key().clone());
        let mut stack = vec![Frame::new(root, root_artifact)];

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            if let Some(child) = node.children.get(frame.next_child) {
                frame.next_child += 1;
                let child: &DependencyNode = child;

                if let Some(item) = visited.get(&(child as *const DependencyNode)) {
                    frame.children.push(Arc::clone(item));
                    self.record(false);
                    continue;
                }

                let artifact = artifacts.resolve(child);
                if on_path.contains(artifact.key()) {
                    let mut path = stack
                        .iter()
                        .map(|f| session.compute_address(&f.artifact).map(|a| a.to_string()))
                        .collect::<Result<Vec<_>>>()?;
                    path.push(session.compute_address(&artifact)?.to_string());
                    return Err(ModelError::DependencyCycle { path });
                }
                if stack.len() >= max_depth {
                    return Err(ModelError::GraphTooDeep {
                        address: session.compute_address(&artifact)?.to_string(),
                        max_depth,
                    });
                }

                on_path.insert(artifact.key().clone());
                stack.push(Frame::new(child, artifact));
                continue;
            }

            let Some(done) = stack.pop() else { break };
            on_path.remove(done.artifact.key());
            let item = self.intern(&done.artifact, done.children, session)?;
            visited.insert(done.node as *const DependencyNode, Arc::clone(&item));

            match stack.last_mut() {
                Some(parent) => parent.children.push(item),
                None => return Ok(item),
            }
        }

        unreachable!("the root frame returns its item when popped")
    }

    fn intern(
        &self,
        artifact: &ClasspathArtifact,
        children: Vec<Arc<GraphItem>>,
        session: &GraphBuildSession,
    ) -> Result<Arc<GraphItem>> {
        let key = ItemKey::new(artifact, &children);
        let mut constructed = false;

        let item = self.cells.get_or_try_init(&key, || {
            constructed = true;
            let address = session.compute_address(artifact)?;
            session.library(artifact)?;

            debug!(address = %address, children = children.len(), "Graph item constructed");
            Ok::<_, ModelError>(Arc::new(GraphItem::new(address, children)))
        })?;

        self.record(constructed);
        Ok(item)
    }

    fn record(&self, constructed: bool) {
        if let Some(metrics) = &self.metrics {
            if constructed {
                metrics.graph_item_constructions.inc();
            } else {
                metrics.graph_item_hits.inc();
            }
        }
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
