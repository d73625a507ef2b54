//! Permission providers and the aggregation contract
//!
//! The host authorization framework composes several providers and accepts
//! the first one willing to render an opinion for a node. Every provider
//! answers the same query shapes ([`AggregatedPermissionProvider`]) and uses
//! the same sentinels to abstain:
//!
//! - [`TreePermission::NoRecourse`] from the tree queries,
//! - [`Permissions::NO_PERMISSION`] from `supported_permissions*`,
//! - [`PrivilegeBits::EMPTY`] from `supported_privileges`,
//! - [`RepositoryPermission::EMPTY`] at repository level.
//!
//! ```text
//! aggregator → tree_permission(node)
//!                 → NodeClassifier        (ordinary content?)
//!                 → AncestorAssetResolver (nearest asset)
//!                 → OwnershipEvaluator    (grant?)
//!                 → TreePermission        (per-node handle, child derivation)
//! ```

mod allow_all;
mod asset;
mod pipeline;
mod tree_permission;

pub use allow_all::AllowAllProvider;
pub use asset::AssetPermissionProvider;
pub use pipeline::DecisionPipeline;
pub use tree_permission::{Decision, NodeScope, TreePermission};

use assetguard_core::{PropertyState, Tree, TreeLocation};
use std::collections::BTreeSet;

use crate::permissions::{Permissions, PrivilegeBits, RepositoryPermission};
use crate::tree::NodeClassification;

/// Query interface the host aggregator calls on every provider
///
/// All operations are total: unknown, missing or malformed input yields a
/// definite grant, deny or abstain value. `None` trees stand for
/// repository-level queries.
pub trait AggregatedPermissionProvider: Send + Sync {
    /// Privilege names granted on `tree`
    fn privileges(&self, tree: Option<&Tree>) -> BTreeSet<String>;

    /// True if all `privilege_names` are granted on `tree`
    fn has_privileges(&self, tree: Option<&Tree>, privilege_names: &[&str]) -> bool;

    /// Decision at repository granularity
    fn repository_permission(&self) -> RepositoryPermission;

    /// Handle for `tree` given its parent's handle
    fn tree_permission(&self, tree: &Tree, parent: &TreePermission) -> TreePermission;

    /// Handle for `tree` when the caller already knows its classification
    fn tree_permission_typed(
        &self,
        tree: &Tree,
        classification: NodeClassification,
        parent: &TreePermission,
    ) -> TreePermission;

    /// True if `permissions` are granted on `tree` (or one of its properties)
    fn is_granted(
        &self,
        tree: &Tree,
        property: Option<&PropertyState>,
        permissions: Permissions,
    ) -> bool;

    /// True if `actions` are granted at `path`
    fn is_granted_path(&self, path: &str, actions: &str) -> bool;

    /// True if `permissions` are granted at `location`
    fn is_granted_location(&self, location: &TreeLocation, permissions: Permissions) -> bool;

    /// The subset of `permissions` this provider decides for `tree`
    fn supported_permissions(
        &self,
        tree: Option<&Tree>,
        property: Option<&PropertyState>,
        permissions: Permissions,
    ) -> Permissions;

    /// The subset of `permissions` this provider decides at `location`
    fn supported_permissions_location(
        &self,
        location: Option<&TreeLocation>,
        permissions: Permissions,
    ) -> Permissions;

    /// The subset of `permissions` this provider decides for a handle
    fn supported_permissions_handle(
        &self,
        handle: &TreePermission,
        property: Option<&PropertyState>,
        permissions: Permissions,
    ) -> Permissions;

    /// The subset of `privileges` this provider decides for `tree`
    fn supported_privileges(&self, tree: Option<&Tree>, privileges: PrivilegeBits) -> PrivilegeBits;

    /// Observe the latest store state from the next query on
    fn refresh(&self);
}
