//! Fail-closed access to asset metadata

use assetguard_core::{PropertyValue, Tree};
use tracing::debug;

use crate::config::ProviderConfig;

/// Reads values stored on an asset's metadata node
///
/// Metadata lives at `<asset>/<content marker>/<metadata folder>`. Anything
/// missing or of a non-string type reads as an empty list.
#[derive(Debug, Clone)]
pub struct AssetMetadata {
    content_marker: String,
    metadata_folder: String,
}

impl AssetMetadata {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            content_marker: config.content_marker.clone(),
            metadata_folder: config.metadata_folder.clone(),
        }
    }

    /// The metadata node of `asset`, if present
    pub fn node(&self, asset: &Tree) -> Option<Tree> {
        let content = asset.child(&self.content_marker).ok()?;
        let metadata = content.child(&self.metadata_folder).ok()?;
        metadata.exists().then_some(metadata)
    }

    /// String values of `property` on the metadata node
    pub fn values(&self, asset: &Tree, property: &str) -> Vec<String> {
        let values = self.node(asset).and_then(|metadata| {
            metadata
                .property(property)
                .and_then(PropertyValue::as_strings)
                .map(|v| v.into_iter().map(str::to_string).collect::<Vec<_>>())
        });

        match values {
            Some(values) => values,
            None => {
                debug!(property, asset = %asset.path(), "No metadata found");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetguard_core::{NodePath, NodeState, Snapshot};
    use std::sync::Arc;

    fn snapshot() -> Arc<Snapshot> {
        let metadata = NodeState::builder()
            .property("dam:owners", vec!["alice", "editors"])
            .property("dc:creator", "bob")
            .property("dam:size", 1024i64);
        let root = NodeState::builder()
            .child(
                "asset",
                NodeState::builder()
                    .property("jcr:primaryType", "dam:Asset")
                    .child("jcr:content", NodeState::builder().child("metadata", metadata)),
            )
            .child("bare", NodeState::builder().property("jcr:primaryType", "dam:Asset"))
            .build();
        Arc::new(Snapshot::new(Arc::new(root), 1))
    }

    fn tree(s: &Arc<Snapshot>, p: &str) -> Tree {
        s.tree(&NodePath::parse(p).unwrap())
    }

    #[test]
    fn test_multi_and_single_values() {
        let s = snapshot();
        let metadata = AssetMetadata::new(&ProviderConfig::default());
        let asset = tree(&s, "/asset");
        assert_eq!(metadata.values(&asset, "dam:owners"), vec!["alice", "editors"]);
        assert_eq!(metadata.values(&asset, "dc:creator"), vec!["bob"]);
    }

    #[test]
    fn test_malformed_and_missing_read_empty() {
        let s = snapshot();
        let metadata = AssetMetadata::new(&ProviderConfig::default());
        assert!(metadata.values(&tree(&s, "/asset"), "dam:size").is_empty());
        assert!(metadata.values(&tree(&s, "/asset"), "absent").is_empty());
        assert!(metadata.values(&tree(&s, "/bare"), "dam:owners").is_empty());
        assert!(metadata.node(&tree(&s, "/bare")).is_none());
        assert!(metadata.values(&tree(&s, "/ghost"), "dam:owners").is_empty());
    }
}
