//! Permission bitmasks, privilege bits and the repository-level decision
//!
//! The values mirror what the host aggregator composes across providers:
//! [`Permissions::NO_PERMISSION`] and [`PrivilegeBits::EMPTY`] are the
//! "no opinion" sentinels returned by the `supported_*` queries.

use std::fmt;
use std::ops::{BitAnd, BitOr};
use tracing::trace;

/// Privilege names understood by the provider
pub mod privileges {
    /// Read nodes and properties
    pub const JCR_READ: &str = "jcr:read";
    /// Modify properties
    pub const JCR_MODIFY_PROPERTIES: &str = "jcr:modifyProperties";
    /// Add child nodes
    pub const JCR_ADD_CHILD_NODES: &str = "jcr:addChildNodes";
    /// Remove the node itself
    pub const JCR_REMOVE_NODE: &str = "jcr:removeNode";
    /// Remove child nodes
    pub const JCR_REMOVE_CHILD_NODES: &str = "jcr:removeChildNodes";
    /// Read access control content
    pub const JCR_READ_ACCESS_CONTROL: &str = "jcr:readAccessControl";
    /// Modify access control content
    pub const JCR_MODIFY_ACCESS_CONTROL: &str = "jcr:modifyAccessControl";
    /// Aggregate of every privilege
    pub const JCR_ALL: &str = "jcr:all";
}

/// Bitmask of item-level permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Permissions(u64);

impl Permissions {
    /// Sentinel: no permission requested / supported
    pub const NO_PERMISSION: Self = Self(0);
    pub const READ_NODE: Self = Self(1);
    pub const READ_PROPERTY: Self = Self(1 << 1);
    pub const ADD_PROPERTY: Self = Self(1 << 2);
    pub const MODIFY_PROPERTY: Self = Self(1 << 3);
    pub const REMOVE_PROPERTY: Self = Self(1 << 4);
    pub const ADD_NODE: Self = Self(1 << 5);
    pub const REMOVE_NODE: Self = Self(1 << 6);
    pub const READ_ACCESS_CONTROL: Self = Self(1 << 7);
    pub const MODIFY_ACCESS_CONTROL: Self = Self(1 << 8);

    /// Read nodes and properties
    pub const READ: Self = Self(Self::READ_NODE.0 | Self::READ_PROPERTY.0);
    /// Add, modify or remove properties
    pub const SET_PROPERTY: Self =
        Self(Self::ADD_PROPERTY.0 | Self::MODIFY_PROPERTY.0 | Self::REMOVE_PROPERTY.0);
    /// Remove nodes and properties
    pub const REMOVE: Self = Self(Self::REMOVE_NODE.0 | Self::REMOVE_PROPERTY.0);
    /// Every permission bit
    pub const ALL: Self = Self((1 << 9) - 1);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is present
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Parses a comma-separated action string
    ///
    /// Recognised actions are `read`, `add_node`, `set_property`, `remove`,
    /// `read_access_control` and `modify_access_control`. Unknown actions are
    /// skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetguard_authz::Permissions;
    ///
    /// let bits = Permissions::from_actions("read, set_property");
    /// assert!(bits.contains(Permissions::READ));
    /// assert!(bits.contains(Permissions::MODIFY_PROPERTY));
    /// ```
    pub fn from_actions(actions: &str) -> Self {
        actions
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .fold(Self::NO_PERMISSION, |acc, action| {
                let bits = match action {
                    "read" => Self::READ,
                    "add_node" => Self::ADD_NODE,
                    "set_property" => Self::SET_PROPERTY,
                    "remove" => Self::REMOVE,
                    "read_access_control" => Self::READ_ACCESS_CONTROL,
                    "modify_access_control" => Self::MODIFY_ACCESS_CONTROL,
                    other => {
                        trace!(action = other, "Ignoring unknown action");
                        Self::NO_PERMISSION
                    }
                };
                acc | bits
            })
    }
}

impl BitOr for Permissions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Permissions {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Bitmask of privileges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrivilegeBits(u64);

impl PrivilegeBits {
    /// Sentinel: no privilege requested / supported
    pub const EMPTY: Self = Self(0);
    pub const JCR_READ: Self = Self(1);
    pub const JCR_MODIFY_PROPERTIES: Self = Self(1 << 1);
    pub const JCR_ADD_CHILD_NODES: Self = Self(1 << 2);
    pub const JCR_REMOVE_NODE: Self = Self(1 << 3);
    pub const JCR_REMOVE_CHILD_NODES: Self = Self(1 << 4);
    pub const JCR_READ_ACCESS_CONTROL: Self = Self(1 << 5);
    pub const JCR_MODIFY_ACCESS_CONTROL: Self = Self(1 << 6);
    /// Every privilege bit
    pub const JCR_ALL: Self = Self((1 << 7) - 1);

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Bits for a privilege name, `None` for unknown names
    pub fn from_name(name: &str) -> Option<Self> {
        let bits = match name {
            privileges::JCR_READ => Self::JCR_READ,
            privileges::JCR_MODIFY_PROPERTIES => Self::JCR_MODIFY_PROPERTIES,
            privileges::JCR_ADD_CHILD_NODES => Self::JCR_ADD_CHILD_NODES,
            privileges::JCR_REMOVE_NODE => Self::JCR_REMOVE_NODE,
            privileges::JCR_REMOVE_CHILD_NODES => Self::JCR_REMOVE_CHILD_NODES,
            privileges::JCR_READ_ACCESS_CONTROL => Self::JCR_READ_ACCESS_CONTROL,
            privileges::JCR_MODIFY_ACCESS_CONTROL => Self::JCR_MODIFY_ACCESS_CONTROL,
            privileges::JCR_ALL => Self::JCR_ALL,
            _ => return None,
        };
        Some(bits)
    }
}

impl BitOr for PrivilegeBits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Decision at whole-repository granularity
///
/// The asset provider never opines at this level, so it only hands out
/// [`RepositoryPermission::EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryPermission {
    granted: Permissions,
}

impl RepositoryPermission {
    /// Grants nothing
    pub const EMPTY: Self = Self {
        granted: Permissions::NO_PERMISSION,
    };
    /// Grants everything
    pub const ALL: Self = Self {
        granted: Permissions::ALL,
    };

    pub fn is_granted(&self, permissions: Permissions) -> bool {
        !permissions.is_empty() && self.granted.contains(permissions)
    }
}
