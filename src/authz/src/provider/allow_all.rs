//! Provider handed to sessions that bypass asset authorization

use assetguard_core::{PropertyState, Tree, TreeLocation};
use std::collections::BTreeSet;

use super::tree_permission::TreePermission;
use super::AggregatedPermissionProvider;
use crate::permissions::{privileges, Permissions, PrivilegeBits, RepositoryPermission};
use crate::tree::NodeClassification;

/// Grants everything everywhere
///
/// Used for administrative and service sessions, and on deployments where the
/// asset provider is not active.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllProvider;

impl AggregatedPermissionProvider for AllowAllProvider {
    fn privileges(&self, _tree: Option<&Tree>) -> BTreeSet<String> {
        BTreeSet::from([privileges::JCR_ALL.to_string()])
    }

    fn has_privileges(&self, _tree: Option<&Tree>, _privilege_names: &[&str]) -> bool {
        true
    }

    fn repository_permission(&self) -> RepositoryPermission {
        RepositoryPermission::ALL
    }

    fn tree_permission(&self, _tree: &Tree, _parent: &TreePermission) -> TreePermission {
        TreePermission::Unrestricted
    }

    fn tree_permission_typed(
        &self,
        _tree: &Tree,
        _classification: NodeClassification,
        _parent: &TreePermission,
    ) -> TreePermission {
        TreePermission::Unrestricted
    }

    fn is_granted(
        &self,
        _tree: &Tree,
        _property: Option<&PropertyState>,
        _permissions: Permissions,
    ) -> bool {
        true
    }

    fn is_granted_path(&self, _path: &str, _actions: &str) -> bool {
        true
    }

    fn is_granted_location(&self, _location: &TreeLocation, _permissions: Permissions) -> bool {
        true
    }

    fn supported_permissions(
        &self,
        _tree: Option<&Tree>,
        _property: Option<&PropertyState>,
        permissions: Permissions,
    ) -> Permissions {
        permissions
    }

    fn supported_permissions_location(
        &self,
        _location: Option<&TreeLocation>,
        permissions: Permissions,
    ) -> Permissions {
        permissions
    }

    fn supported_permissions_handle(
        &self,
        _handle: &TreePermission,
        _property: Option<&PropertyState>,
        permissions: Permissions,
    ) -> Permissions {
        permissions
    }

    fn supported_privileges(&self, _tree: Option<&Tree>, privileges: PrivilegeBits) -> PrivilegeBits {
        privileges
    }

    fn refresh(&self) {}
}
