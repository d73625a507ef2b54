//! Per-node decision handles

use assetguard_core::{NodeState, PropertyState, Tree};
use std::fmt;
use std::sync::Arc;

use super::pipeline::DecisionPipeline;
use crate::permissions::Permissions;
use crate::tree::NodeClassification;

/// Outcome a handle renders for its own node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Reads are granted
    Grant,
    /// Reads are denied
    Deny,
    /// No opinion; other providers decide
    Abstain,
}

/// Node a handle was computed for, kept for child derivation
#[derive(Debug)]
pub struct NodeScope {
    tree: Tree,
    classification: NodeClassification,
    pipeline: Arc<DecisionPipeline>,
}

impl NodeScope {
    pub(crate) fn new(
        tree: Tree,
        classification: NodeClassification,
        pipeline: Arc<DecisionPipeline>,
    ) -> Self {
        Self {
            tree,
            classification,
            pipeline,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn classification(&self) -> NodeClassification {
        self.classification
    }
}

/// Resolved decision for one node
///
/// Handles are produced on demand while walking the hierarchy and are never
/// stored. Each handle answers read queries for its own node and derives the
/// handle for a named child:
///
/// | Variant        | Reads                 | Child handle                              |
/// |----------------|-----------------------|-------------------------------------------|
/// | `NoRecourse`   | false                 | `NoRecourse`                              |
/// | `Unrestricted` | true                  | `Unrestricted`                            |
/// | `GrantAll`     | true                  | `GrantAll`, `NoRecourse` if not ordinary  |
/// | `DenyAll`      | false                 | re-evaluated for the child                |
/// | `Delegate`     | forwarded to `parent` | re-evaluated for the child                |
///
/// # Examples
///
/// ```
/// use assetguard_authz::{Decision, Permissions, TreePermission};
///
/// let handle = TreePermission::Unrestricted;
/// assert!(handle.can_read());
/// assert!(handle.is_granted(Permissions::READ));
/// assert_eq!(handle.decision(), Decision::Grant);
/// assert_eq!(TreePermission::NoRecourse.decision(), Decision::Abstain);
/// ```
#[derive(Clone)]
pub enum TreePermission {
    /// This provider has no opinion on the node or anything below it
    NoRecourse,
    /// Everything is readable at and below this node, whatever its kind
    Unrestricted,
    /// Ordinary content is readable at and below this node; children are
    /// classified but not re-resolved
    GrantAll(Arc<NodeScope>),
    /// Nothing is readable at this node; children are evaluated on their own
    DenyAll(Arc<NodeScope>),
    /// Reads follow `parent`; children are evaluated on their own
    Delegate {
        scope: Arc<NodeScope>,
        parent: Arc<TreePermission>,
    },
}

impl TreePermission {
    /// Delegating handle for `scope`
    ///
    /// A delegating parent is unwrapped so reads reach the deciding handle in
    /// one step.
    pub(crate) fn delegate(scope: NodeScope, parent: &TreePermission) -> Self {
        let parent = match parent {
            TreePermission::Delegate { parent, .. } => Arc::clone(parent),
            other => Arc::new(other.clone()),
        };
        TreePermission::Delegate {
            scope: Arc::new(scope),
            parent,
        }
    }

    /// Derives the handle for the child `name` whose state is `child_state`
    pub fn child_permission(&self, name: &str, child_state: &Arc<NodeState>) -> TreePermission {
        self.derive(name, Some(child_state))
    }

    /// Derives the handle for a child `name` that does not exist in the snapshot
    pub fn missing_child_permission(&self, name: &str) -> TreePermission {
        self.derive(name, None)
    }

    fn derive(&self, name: &str, child_state: Option<&Arc<NodeState>>) -> TreePermission {
        match self {
            TreePermission::NoRecourse => TreePermission::NoRecourse,
            TreePermission::Unrestricted => TreePermission::Unrestricted,
            TreePermission::GrantAll(scope)
            | TreePermission::DenyAll(scope)
            | TreePermission::Delegate { scope, .. } => {
                scope.pipeline.child_permission(scope, name, child_state, self)
            }
        }
    }

    /// The decision this handle renders for its own node
    pub fn decision(&self) -> Decision {
        match self {
            TreePermission::NoRecourse => Decision::Abstain,
            TreePermission::Unrestricted | TreePermission::GrantAll(_) => Decision::Grant,
            TreePermission::DenyAll(_) => Decision::Deny,
            TreePermission::Delegate { parent, .. } => parent.decision(),
        }
    }

    pub fn can_read(&self) -> bool {
        self.decision() == Decision::Grant
    }

    pub fn can_read_property(&self, _property: &PropertyState) -> bool {
        self.can_read()
    }

    pub fn can_read_all(&self) -> bool {
        self.can_read()
    }

    pub fn can_read_properties(&self) -> bool {
        self.can_read()
    }

    pub fn is_granted(&self, _permissions: Permissions) -> bool {
        self.can_read()
    }

    pub fn is_granted_property(&self, permissions: Permissions, _property: &PropertyState) -> bool {
        self.is_granted(permissions)
    }

    /// The node this handle was computed for, if it keeps one
    pub fn scope(&self) -> Option<&NodeScope> {
        match self {
            TreePermission::GrantAll(scope)
            | TreePermission::DenyAll(scope)
            | TreePermission::Delegate { scope, .. } => Some(scope.as_ref()),
            _ => None,
        }
    }

    pub fn is_no_recourse(&self) -> bool {
        matches!(self, TreePermission::NoRecourse)
    }

    /// True for handles only produced once an asset anchor was found
    pub(crate) fn has_asset_anchor(&self) -> bool {
        matches!(self, TreePermission::GrantAll(_) | TreePermission::Delegate { .. })
    }

    fn variant_name(&self) -> &'static str {
        match self {
            TreePermission::NoRecourse => "NoRecourse",
            TreePermission::Unrestricted => "Unrestricted",
            TreePermission::GrantAll(_) => "GrantAll",
            TreePermission::DenyAll(_) => "DenyAll",
            TreePermission::Delegate { .. } => "Delegate",
        }
    }
}

impl fmt::Debug for TreePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreePermission::Delegate { scope, parent } => f
                .debug_struct("Delegate")
                .field("path", &scope.tree.path().as_str())
                .field("parent", parent)
                .finish(),
            TreePermission::GrantAll(scope) | TreePermission::DenyAll(scope) => f
                .debug_tuple(self.variant_name())
                .field(&scope.tree.path().as_str())
                .finish(),
            other => f.write_str(other.variant_name()),
        }
    }
}

impl fmt::Display for TreePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.variant_name())
    }
}
