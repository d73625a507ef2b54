//! Ownership-based permission provider for the asset mount

use assetguard_core::{NodePath, PropertyState, Snapshot, SnapshotSource, Tree, TreeLocation};
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

use super::pipeline::DecisionPipeline;
use super::tree_permission::{Decision, TreePermission};
use super::AggregatedPermissionProvider;
use crate::config::ProviderConfig;
use crate::ownership::OwnershipEvaluator;
use crate::permissions::{Permissions, PrivilegeBits, RepositoryPermission};
use crate::tree::NodeClassification;
use crate::types::PrincipalSet;

/// Grants read access on assets to their owners
///
/// One provider serves one session. Its only mutable state is the snapshot
/// reference, replaced as a whole by [`refresh`](AggregatedPermissionProvider::refresh).
/// Every query takes the snapshot once at entry (or uses the one the caller's
/// tree carries) and resolves everything against it.
///
/// # Examples
///
/// ```
/// use assetguard_authz::{
///     AggregatedPermissionProvider, AssetPermissionProvider, NeverOwner, PrincipalSet,
///     ProviderConfig, TreePermission,
/// };
/// use assetguard_core::{ContentStore, NodePath};
/// use std::sync::Arc;
///
/// let store = Arc::new(ContentStore::new());
/// let provider = AssetPermissionProvider::new(
///     &ProviderConfig::default(),
///     PrincipalSet::from_names(["alice"]),
///     store,
///     Arc::new(NeverOwner),
/// );
///
/// let outside = provider.tree(&NodePath::parse("/apps/site").unwrap());
/// let handle = provider.tree_permission(&outside, &TreePermission::NoRecourse);
/// assert!(handle.is_no_recourse());
/// ```
pub struct AssetPermissionProvider {
    pipeline: Arc<DecisionPipeline>,
    source: Arc<dyn SnapshotSource>,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl AssetPermissionProvider {
    pub fn new(
        config: &ProviderConfig,
        principals: PrincipalSet,
        source: Arc<dyn SnapshotSource>,
        ownership: Arc<dyn OwnershipEvaluator>,
    ) -> Self {
        let snapshot = source.snapshot();
        debug!(
            principals = ?principals.names(),
            revision = snapshot.revision(),
            "Created asset permission provider"
        );
        Self {
            pipeline: Arc::new(DecisionPipeline::new(config, principals, ownership)),
            source,
            snapshot: RwLock::new(snapshot),
        }
    }

    /// The snapshot queries currently resolve against
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().clone()
    }

    /// Tree at `path` in the current snapshot
    pub fn tree(&self, path: &NodePath) -> Tree {
        self.snapshot().tree(path)
    }

    pub fn principals(&self) -> &PrincipalSet {
        self.pipeline.principals()
    }

    pub fn pipeline(&self) -> &Arc<DecisionPipeline> {
        &self.pipeline
    }

    /// Handle for the store root
    pub fn root_permission(&self) -> TreePermission {
        let root = self.snapshot().root();
        self.tree_permission(&root, &TreePermission::NoRecourse)
    }

    /// Handle for `path`, derived from the root down the way the aggregator does
    ///
    /// Existing nodes are reached through child derivation, place-holders
    /// below the last existing node through missing-child derivation.
    pub fn resolve(&self, path: &NodePath) -> TreePermission {
        let snapshot = self.snapshot();
        let root = snapshot.root();
        let mut handle = self.tree_permission(&root, &TreePermission::NoRecourse);

        for child_path in path.lineage().skip(1) {
            let Some(name) = child_path.name() else {
                break;
            };
            handle = match snapshot.state(&child_path) {
                Some(state) => handle.child_permission(name, &state),
                None => handle.missing_child_permission(name),
            };
        }
        handle
    }

    /// The nearest existing node at or above `location`
    ///
    /// Property locations resolve to the node holding the property.
    fn tree_from_location(location: &TreeLocation) -> Option<Tree> {
        let mut current = Some(location.clone());
        while let Some(loc) = current {
            if let Some(tree) = loc.tree() {
                return Some(tree);
            }
            current = loc.parent();
        }
        None
    }

    fn supports(&self, tree: &Tree) -> bool {
        self.pipeline.anchor(tree).is_some()
    }
}

impl AggregatedPermissionProvider for AssetPermissionProvider {
    fn privileges(&self, tree: Option<&Tree>) -> BTreeSet<String> {
        match tree {
            Some(tree) if self.pipeline.is_ancestor_asset_owner(tree) => {
                self.pipeline.owner_privileges().clone()
            }
            _ => BTreeSet::new(),
        }
    }

    fn has_privileges(&self, tree: Option<&Tree>, privilege_names: &[&str]) -> bool {
        let granted = tree.is_some_and(|tree| self.pipeline.is_ancestor_asset_owner(tree));
        debug!(privileges = ?privilege_names, granted, "has_privileges");
        granted
    }

    fn repository_permission(&self) -> RepositoryPermission {
        RepositoryPermission::EMPTY
    }

    fn tree_permission(&self, tree: &Tree, parent: &TreePermission) -> TreePermission {
        let classification = self.pipeline.classifier().classify_path(tree);
        self.pipeline.evaluate(tree.clone(), classification, parent)
    }

    fn tree_permission_typed(
        &self,
        tree: &Tree,
        classification: NodeClassification,
        parent: &TreePermission,
    ) -> TreePermission {
        if !classification.is_ordinary() {
            return TreePermission::NoRecourse;
        }
        self.pipeline.evaluate(tree.clone(), classification, parent)
    }

    fn is_granted(
        &self,
        tree: &Tree,
        property: Option<&PropertyState>,
        permissions: Permissions,
    ) -> bool {
        let granted = self.pipeline.is_ancestor_asset_owner(tree);
        match property {
            Some(property) => debug!(
                node = %tree.path(),
                property = property.name(),
                %permissions,
                granted,
                "is_granted"
            ),
            None => debug!(node = %tree.path(), %permissions, granted, "is_granted"),
        }
        granted
    }

    fn is_granted_path(&self, path: &str, actions: &str) -> bool {
        let path = match NodePath::parse(path) {
            Ok(path) => path,
            Err(err) => {
                debug!(path, %err, "Malformed path, permission denied");
                return false;
            }
        };
        let location = self.snapshot().location(&path);
        self.is_granted_location(&location, Permissions::from_actions(actions))
    }

    fn is_granted_location(&self, location: &TreeLocation, permissions: Permissions) -> bool {
        match Self::tree_from_location(location) {
            Some(tree) => self.is_granted(&tree, location.property().as_ref(), permissions),
            None => false,
        }
    }

    fn supported_permissions(
        &self,
        tree: Option<&Tree>,
        _property: Option<&PropertyState>,
        permissions: Permissions,
    ) -> Permissions {
        if permissions.is_empty() {
            return permissions;
        }
        match tree {
            Some(tree) if self.supports(tree) => permissions,
            _ => Permissions::NO_PERMISSION,
        }
    }

    fn supported_permissions_location(
        &self,
        location: Option<&TreeLocation>,
        permissions: Permissions,
    ) -> Permissions {
        if permissions.is_empty() {
            return permissions;
        }
        match location.and_then(Self::tree_from_location) {
            Some(tree) if self.supports(&tree) => permissions,
            _ => Permissions::NO_PERMISSION,
        }
    }

    fn supported_permissions_handle(
        &self,
        handle: &TreePermission,
        _property: Option<&PropertyState>,
        permissions: Permissions,
    ) -> Permissions {
        if handle.has_asset_anchor() && handle.decision() != Decision::Abstain {
            permissions
        } else {
            Permissions::NO_PERMISSION
        }
    }

    fn supported_privileges(&self, tree: Option<&Tree>, privileges: PrivilegeBits) -> PrivilegeBits {
        if privileges.is_empty() {
            return privileges;
        }
        match tree {
            Some(tree) if self.supports(tree) => {
                debug!(node = %tree.path(), "Supporting all privileges");
                PrivilegeBits::JCR_ALL
            }
            _ => PrivilegeBits::EMPTY,
        }
    }

    fn refresh(&self) {
        let next = self.source.snapshot();
        let from = self.snapshot.read().revision();
        let to = next.revision();
        *self.snapshot.write() = next;
        info!(from, to, "Refreshed provider snapshot");
    }
}

impl std::fmt::Debug for AssetPermissionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetPermissionProvider")
            .field("pipeline", &self.pipeline)
            .field("revision", &self.snapshot.read().revision())
            .finish_non_exhaustive()
    }
}
