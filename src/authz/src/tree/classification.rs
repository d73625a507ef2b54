//! Structural classification of nodes

use assetguard_core::Tree;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{ClassificationConfig, ProviderConfig};

/// Structural role of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeClassification {
    /// Regular content; eligible for ownership decisions
    Ordinary,
    /// Hidden or internal subtree
    Internal,
    /// Access control policies and entries
    AccessControlMetadata,
}

impl NodeClassification {
    pub fn is_ordinary(self) -> bool {
        matches!(self, Self::Ordinary)
    }
}

impl fmt::Display for NodeClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordinary => write!(f, "ordinary"),
            Self::Internal => write!(f, "internal"),
            Self::AccessControlMetadata => write!(f, "access-control"),
        }
    }
}

/// Prefix of hidden node names
const HIDDEN_PREFIX: char = ':';

/// Classifies nodes top-down
///
/// A child's classification depends only on its own name, its resource kind
/// and its parent's classification. Leaving `Ordinary` is permanent for the
/// whole subtree; `Internal` wins over `AccessControlMetadata`.
#[derive(Debug, Clone)]
pub struct NodeClassifier {
    resource_kind_property: String,
    markers: ClassificationConfig,
}

impl NodeClassifier {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            resource_kind_property: config.resource_kind_property.clone(),
            markers: config.classification.clone(),
        }
    }

    /// Classifies `node` given its parent's classification
    pub fn classify(&self, node: &Tree, parent: NodeClassification) -> NodeClassification {
        if parent == NodeClassification::Internal || self.is_internal(node) {
            return NodeClassification::Internal;
        }
        if parent == NodeClassification::AccessControlMetadata || self.is_access_control(node) {
            return NodeClassification::AccessControlMetadata;
        }
        NodeClassification::Ordinary
    }

    /// Classifies any tree by walking its snapshot from the root down
    pub fn classify_path(&self, node: &Tree) -> NodeClassification {
        let snapshot = node.snapshot();
        let mut lineage = node.path().lineage();
        // the root itself is always ordinary
        lineage.next();

        let mut classification = NodeClassification::Ordinary;
        for path in lineage {
            if classification == NodeClassification::Internal {
                break;
            }
            let tree = if &path == node.path() {
                node.clone()
            } else {
                snapshot.tree(&path)
            };
            classification = self.classify(&tree, classification);
        }
        classification
    }

    fn is_internal(&self, node: &Tree) -> bool {
        node.name().is_some_and(|name| {
            name.starts_with(HIDDEN_PREFIX) || self.markers.internal_names.iter().any(|n| n == name)
        })
    }

    fn is_access_control(&self, node: &Tree) -> bool {
        let by_name = node
            .name()
            .is_some_and(|name| self.markers.policy_names.iter().any(|n| n == name));
        let by_kind = node
            .property(&self.resource_kind_property)
            .and_then(|v| v.as_str())
            .is_some_and(|kind| self.markers.access_control_kinds.iter().any(|k| k == kind));
        by_name || by_kind
    }
}
