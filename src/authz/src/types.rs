//! Core authorization types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Kind of security principal attached to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    /// Regular user account
    User,
    /// Group the user is a member of
    Group,
    /// Administrative principal
    Admin,
    /// Internal system principal
    System,
}

/// Principal (user, group, admin or system identity)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Principal {
    /// Principal name (e.g., "alice", "everyone")
    pub name: String,

    /// Principal kind
    #[serde(rename = "type")]
    pub kind: PrincipalKind,
}

impl Principal {
    pub fn new(name: impl Into<String>, kind: PrincipalKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self::new(name, PrincipalKind::User)
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, PrincipalKind::Group)
    }

    pub fn admin(name: impl Into<String>) -> Self {
        Self::new(name, PrincipalKind::Admin)
    }

    pub fn system() -> Self {
        Self::new("system", PrincipalKind::System)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The principals attached to one request
///
/// Immutable once built; a permission provider keeps the set it was created
/// with for its whole lifetime.
///
/// # Examples
///
/// ```
/// use assetguard_authz::{Principal, PrincipalSet};
///
/// let principals = PrincipalSet::from_iter([Principal::user("alice"), Principal::group("editors")]);
/// assert!(principals.contains_name("editors"));
/// assert_eq!(principals.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrincipalSet {
    principals: BTreeSet<Principal>,
}

impl PrincipalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set of user principals built from plain names
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(Principal::user).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Principal> {
        self.principals.iter()
    }

    /// Principal names in sorted order, deduplicated
    pub fn names(&self) -> BTreeSet<&str> {
        self.principals.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.principals.iter().any(|p| p.name == name)
    }

    pub fn contains_kind(&self, kind: PrincipalKind) -> bool {
        self.principals.iter().any(|p| p.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.principals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }
}

impl FromIterator<Principal> for PrincipalSet {
    fn from_iter<I: IntoIterator<Item = Principal>>(iter: I) -> Self {
        Self {
            principals: iter.into_iter().collect(),
        }
    }
}
