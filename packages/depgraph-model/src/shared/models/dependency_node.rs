//! Legacy dependency-node trees

use super::{ClasspathArtifact, DependencyType, ResolvedArtifact};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Java,
    Android,
    Atom,
}

impl NodeType {
    pub fn dependency_type(&self) -> DependencyType {
        match self {
            NodeType::Java => DependencyType::Java,
            NodeType::Android | NodeType::Atom => DependencyType::Android,
        }
    }
}

/// Node of the resolution tree exposed by the legacy dependency container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    pub artifact: ResolvedArtifact,
    pub node_type: NodeType,
    #[serde(default)]
    pub children: Vec<Arc<DependencyNode>>,
}

impl DependencyNode {
    pub fn new(artifact: ResolvedArtifact, node_type: NodeType) -> Self {
        Self {
            artifact,
            node_type,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: Arc<DependencyNode>) -> Self {
        self.children.push(child);
        self
    }

    /// Classpath view of the node's artifact
    pub fn classpath_artifact(&self) -> ClasspathArtifact {
        ClasspathArtifact::new(
            self.artifact.clone(),
            self.node_type.dependency_type(),
            false,
            None,
        )
    }
}
