//! Nearest enclosing asset lookup

use assetguard_core::Tree;
use tracing::trace;

use crate::config::ProviderConfig;

/// Finds the asset a node belongs to
///
/// A node is an asset when its resource kind property equals the configured
/// asset kind. Descendants of an asset are only looked up through their
/// ancestors when their path runs through the content marker segment
/// (renditions, metadata and other generated children).
///
/// The resolver does not filter by mount; callers restrict it to the asset
/// mount before calling.
#[derive(Debug, Clone)]
pub struct AncestorAssetResolver {
    resource_kind_property: String,
    asset_kind: String,
    content_marker: String,
}

impl AncestorAssetResolver {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            resource_kind_property: config.resource_kind_property.clone(),
            asset_kind: config.asset_kind.clone(),
            content_marker: config.content_marker.clone(),
        }
    }

    /// True if `node` is marked as an asset
    pub fn is_asset(&self, node: &Tree) -> bool {
        node.property(&self.resource_kind_property)
            .and_then(|v| v.as_str())
            .is_some_and(|kind| kind == self.asset_kind)
    }

    /// Returns the nearest asset at or above `node`
    ///
    /// The walk moves one level at a time and stops at the first asset or at
    /// the store root, so it is bounded by the node's depth.
    pub fn find_ancestor_asset(&self, node: &Tree) -> Option<Tree> {
        if self.is_asset(node) {
            return Some(node.clone());
        }

        if !node.path().contains_segment(&self.content_marker) {
            return None;
        }

        let mut current = node.parent();
        while let Some(tree) = current {
            if self.is_asset(&tree) {
                trace!(node = %node.path(), asset = %tree.path(), "Found ancestor asset");
                return Some(tree);
            }
            current = tree.parent();
        }

        None
    }
}
