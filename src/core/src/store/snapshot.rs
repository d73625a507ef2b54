//! Point-in-time snapshots and the read-only trees they expose

use std::sync::Arc;

use super::node::NodeState;
use crate::error::Result;
use crate::types::{NodePath, PropertyState, PropertyValue};

/// Immutable, consistent view of the whole store
///
/// Everything reachable from a snapshot stays unchanged for as long as the
/// snapshot is held; mutations in [`ContentStore`](super::ContentStore)
/// publish new snapshots instead.
#[derive(Debug, Clone)]
pub struct Snapshot {
    root: Arc<NodeState>,
    revision: u64,
}

impl Snapshot {
    pub fn new(root: Arc<NodeState>, revision: u64) -> Self {
        Self { root, revision }
    }

    /// Snapshot of an empty store (root only)
    pub fn empty() -> Self {
        Self::new(Arc::new(NodeState::new()), 0)
    }

    /// Revision this snapshot was taken at
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn root_state(&self) -> &Arc<NodeState> {
        &self.root
    }

    /// Looks up the state at `path`
    pub fn state(&self, path: &NodePath) -> Option<Arc<NodeState>> {
        let mut current = &self.root;
        for segment in path.segments() {
            current = current.child(segment)?;
        }
        Some(Arc::clone(current))
    }

    /// Returns the tree at `path`
    ///
    /// Always succeeds: a missing node yields a placeholder tree whose
    /// [`Tree::exists`] is false.
    pub fn tree(self: &Arc<Self>, path: &NodePath) -> Tree {
        Tree {
            snapshot: Arc::clone(self),
            path: path.clone(),
            state: self.state(path),
        }
    }

    pub fn root(self: &Arc<Self>) -> Tree {
        self.tree(&NodePath::root())
    }

    /// Returns a location that may denote a node or a property
    pub fn location(self: &Arc<Self>, path: &NodePath) -> TreeLocation {
        TreeLocation {
            snapshot: Arc::clone(self),
            path: path.clone(),
        }
    }
}

/// Read-only view of one node within a snapshot
///
/// Parent navigation is path addressed: [`Tree::parent`] looks the parent up
/// in the same snapshot.
#[derive(Debug, Clone)]
pub struct Tree {
    snapshot: Arc<Snapshot>,
    path: NodePath,
    state: Option<Arc<NodeState>>,
}

impl Tree {
    pub fn exists(&self) -> bool {
        self.state.is_some()
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.path.name()
    }

    pub fn is_root(&self) -> bool {
        self.path.is_root()
    }

    /// Snapshot this tree was read from
    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    pub fn state(&self) -> Option<&Arc<NodeState>> {
        self.state.as_ref()
    }

    /// Parent tree, `None` at the root
    pub fn parent(&self) -> Option<Tree> {
        self.path.parent().map(|p| self.snapshot.tree(&p))
    }

    /// Named child, a placeholder if it does not exist
    pub fn child(&self, name: &str) -> Result<Tree> {
        let path = self.path.child(name)?;
        let state = self
            .state
            .as_ref()
            .and_then(|s| s.child(name))
            .map(Arc::clone);
        Ok(Tree {
            snapshot: Arc::clone(&self.snapshot),
            path,
            state,
        })
    }

    /// Child tree built from an explicitly supplied state
    ///
    /// Used when a caller walks the hierarchy and already holds the child's
    /// state.
    pub fn child_with_state(&self, name: &str, state: Arc<NodeState>) -> Result<Tree> {
        Ok(Tree {
            snapshot: Arc::clone(&self.snapshot),
            path: self.path.child(name)?,
            state: Some(state),
        })
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.state.as_ref()?.property(name)
    }

    pub fn property_state(&self, name: &str) -> Option<PropertyState> {
        self.property(name)
            .map(|value| PropertyState::new(name, value.clone()))
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.state.as_ref().is_some_and(|s| s.has_child(name))
    }

    pub fn child_names(&self) -> Vec<String> {
        self.state
            .as_ref()
            .map(|s| s.child_names().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// A path that may point at a node, a property, or nothing
#[derive(Debug, Clone)]
pub struct TreeLocation {
    snapshot: Arc<Snapshot>,
    path: NodePath,
}

impl TreeLocation {
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// The existing node at this location
    pub fn tree(&self) -> Option<Tree> {
        let tree = self.snapshot.tree(&self.path);
        tree.exists().then_some(tree)
    }

    /// The property at this location, if no node shadows it
    pub fn property(&self) -> Option<PropertyState> {
        if self.snapshot.state(&self.path).is_some() {
            return None;
        }
        let name = self.path.name()?;
        let parent = self.snapshot.state(&self.path.parent()?)?;
        parent
            .property(name)
            .map(|value| PropertyState::new(name, value.clone()))
    }

    pub fn parent(&self) -> Option<TreeLocation> {
        self.path.parent().map(|p| self.snapshot.location(&p))
    }

    /// True if the location denotes a node or a property
    pub fn exists(&self) -> bool {
        self.tree().is_some() || self.property().is_some()
    }
}
