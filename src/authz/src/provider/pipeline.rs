//! Classification → asset resolution → ownership → handle

use assetguard_core::{NodePath, NodeState, Tree};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, trace};

use super::tree_permission::{NodeScope, TreePermission};
use crate::config::ProviderConfig;
use crate::ownership::{OwnershipEvaluator, ScopedOwnership};
use crate::tree::{AncestorAssetResolver, NodeClassification, NodeClassifier};
use crate::types::PrincipalSet;

/// The per-session decision logic shared by a provider and its handles
///
/// Holds everything that stays fixed for a provider's lifetime. Nothing in
/// here depends on the snapshot: trees carry their own.
#[derive(Debug)]
pub struct DecisionPipeline {
    asset_mount: NodePath,
    owner_privileges: BTreeSet<String>,
    principals: PrincipalSet,
    classifier: NodeClassifier,
    resolver: AncestorAssetResolver,
    ownership: ScopedOwnership,
}

impl DecisionPipeline {
    pub(crate) fn new(
        config: &ProviderConfig,
        principals: PrincipalSet,
        ownership: Arc<dyn OwnershipEvaluator>,
    ) -> Self {
        Self {
            asset_mount: config.asset_mount.clone(),
            owner_privileges: config.owner_privilege_set(),
            principals,
            classifier: NodeClassifier::new(config),
            resolver: AncestorAssetResolver::new(config),
            ownership: ScopedOwnership::new(config.ownership_region.clone(), ownership),
        }
    }

    pub fn principals(&self) -> &PrincipalSet {
        &self.principals
    }

    pub fn owner_privileges(&self) -> &BTreeSet<String> {
        &self.owner_privileges
    }

    pub fn classifier(&self) -> &NodeClassifier {
        &self.classifier
    }

    pub fn resolver(&self) -> &AncestorAssetResolver {
        &self.resolver
    }

    /// Node is the mount or lies beneath it
    pub fn is_in_mount(&self, tree: &Tree) -> bool {
        tree.path().is_same_or_descendant_of(&self.asset_mount)
    }

    /// Node sits above the mount (folders that will contain the mount)
    pub fn is_mount_ancestor(&self, tree: &Tree) -> bool {
        tree.path().is_ancestor_of(&self.asset_mount)
    }

    /// Nearest asset for an ordinary node inside the mount
    pub fn anchor(&self, tree: &Tree) -> Option<Tree> {
        if !self.is_in_mount(tree) {
            return None;
        }
        if !self.classifier.classify_path(tree).is_ordinary() {
            trace!(node = %tree.path(), "Node is not ordinary content");
            return None;
        }
        self.resolver.find_ancestor_asset(tree)
    }

    /// True if the session owns the asset `tree` belongs to
    pub fn is_ancestor_asset_owner(&self, tree: &Tree) -> bool {
        let Some(asset) = self.anchor(tree) else {
            debug!(node = %tree.path(), "Asset not found for the tree, so permission is denied");
            return false;
        };
        let owner = self.ownership.is_owner(&self.principals, &asset);
        debug!(node = %tree.path(), asset = %asset.path(), owner, "Ownership evaluated");
        owner
    }

    /// Runs the state machine for one node
    ///
    /// `classification` must be the node's own classification.
    pub(crate) fn evaluate(
        self: &Arc<Self>,
        tree: Tree,
        classification: NodeClassification,
        parent: &TreePermission,
    ) -> TreePermission {
        if !classification.is_ordinary() {
            trace!(node = %tree.path(), %classification, "Abstaining for non-ordinary node");
            return TreePermission::NoRecourse;
        }

        if self.is_mount_ancestor(&tree) {
            return self.deny(tree, classification);
        }

        if !self.is_in_mount(&tree) {
            trace!(node = %tree.path(), "Outside asset mount, no recourse");
            return TreePermission::NoRecourse;
        }

        match self.resolver.find_ancestor_asset(&tree) {
            Some(asset) => {
                if self.ownership.is_owner(&self.principals, &asset) {
                    debug!(node = %tree.path(), asset = %asset.path(), "Owner of ancestor asset, granting all");
                    self.grant(tree, classification)
                } else {
                    trace!(node = %tree.path(), asset = %asset.path(), "Not owner, delegating to parent");
                    TreePermission::delegate(
                        NodeScope::new(tree, classification, Arc::clone(self)),
                        parent,
                    )
                }
            }
            None => self.deny(tree, classification),
        }
    }

    fn grant(self: &Arc<Self>, tree: Tree, classification: NodeClassification) -> TreePermission {
        if !classification.is_ordinary() {
            trace!(node = %tree.path(), %classification, "Owner grant stops at non-ordinary node");
            return TreePermission::NoRecourse;
        }
        TreePermission::GrantAll(Arc::new(NodeScope::new(
            tree,
            classification,
            Arc::clone(self),
        )))
    }

    fn deny(self: &Arc<Self>, tree: Tree, classification: NodeClassification) -> TreePermission {
        trace!(node = %tree.path(), "No asset anchor, denying for this node");
        TreePermission::DenyAll(Arc::new(NodeScope::new(
            tree,
            classification,
            Arc::clone(self),
        )))
    }

    /// Derives the handle for a child of `scope`
    ///
    /// Below an owner grant the child is only classified; everywhere else the
    /// state machine runs again. A missing `child_state` means the child is
    /// absent from the snapshot.
    pub(crate) fn child_permission(
        self: &Arc<Self>,
        scope: &NodeScope,
        name: &str,
        child_state: Option<&Arc<NodeState>>,
        parent: &TreePermission,
    ) -> TreePermission {
        let child = match child_state {
            Some(state) => scope.tree().child_with_state(name, Arc::clone(state)),
            None => scope.tree().child(name),
        };
        let child = match child {
            Ok(child) => child,
            Err(err) => {
                debug!(parent = %scope.tree().path(), name, %err, "Invalid child name, no recourse");
                return TreePermission::NoRecourse;
            }
        };
        let classification = self.classifier.classify(&child, scope.classification());
        if matches!(parent, TreePermission::GrantAll(_)) {
            return self.grant(child, classification);
        }
        self.evaluate(child, classification, parent)
    }
}
