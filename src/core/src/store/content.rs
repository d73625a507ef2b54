//! In-memory content store publishing immutable snapshots

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use super::node::{NodeBuilder, NodeState};
use super::snapshot::Snapshot;
use crate::error::{CoreError, Result};
use crate::traits::SnapshotSource;
use crate::types::{NodePath, PropertyValue};

/// Mutable store that hands out consistent snapshots
///
/// Each mutation rebuilds the nodes between the root and the changed node,
/// shares everything else with the previous revision, and swaps the current
/// snapshot pointer. Snapshots handed out earlier are unaffected.
///
/// # Examples
///
/// ```
/// use assetguard_core::{ContentStore, NodePath, NodeState, SnapshotSource};
///
/// let store = ContentStore::new();
/// let before = store.snapshot();
///
/// store.add_node(&NodePath::parse("/content").unwrap(), NodeState::builder()).unwrap();
///
/// assert!(!before.tree(&NodePath::parse("/content").unwrap()).exists());
/// assert!(store.snapshot().tree(&NodePath::parse("/content").unwrap()).exists());
/// ```
pub struct ContentStore {
    current: RwLock<Arc<Snapshot>>,
}

impl ContentStore {
    /// Creates a store containing only the root node
    pub fn new() -> Self {
        Self::with_root(NodeState::new())
    }

    /// Creates a store from a prepared root state
    pub fn with_root(root: NodeState) -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot::new(Arc::new(root), 0))),
        }
    }

    /// Current revision
    pub fn revision(&self) -> u64 {
        self.current.read().revision()
    }

    /// Adds (or replaces) the node at `path`; its parent must exist
    pub fn add_node(&self, path: &NodePath, node: NodeBuilder) -> Result<()> {
        let (parent, name) = split(path)?;
        let child = Arc::new(node.build());
        self.mutate(&parent, move |state| {
            state.set_child(name, child);
            Ok(())
        })?;
        debug!(path = %path, "Node added");
        Ok(())
    }

    /// Removes the node at `path` and its subtree
    pub fn remove(&self, path: &NodePath) -> Result<()> {
        let (parent, name) = split(path)?;
        self.mutate(&parent, |state| {
            state
                .remove_child(&name)
                .map(|_| ())
                .ok_or_else(|| CoreError::NotFound(path.to_string()))
        })?;
        debug!(path = %path, "Node removed");
        Ok(())
    }

    /// Sets a property on an existing node
    pub fn set_property(
        &self,
        path: &NodePath,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<()> {
        let value = value.into();
        self.mutate(path, |state| {
            state.set_property(name.to_string(), value);
            Ok(())
        })?;
        debug!(path = %path, property = name, "Property set");
        Ok(())
    }

    /// Removes a property from an existing node
    pub fn remove_property(&self, path: &NodePath, name: &str) -> Result<()> {
        self.mutate(path, |state| {
            state
                .remove_property(name)
                .map(|_| ())
                .ok_or_else(|| CoreError::NotFound(format!("{}@{}", path, name)))
        })
    }

    fn mutate<F>(&self, target: &NodePath, f: F) -> Result<()>
    where
        F: FnOnce(&mut NodeState) -> Result<()>,
    {
        let mut current = self.current.write();
        let root = rebuild(current.root_state(), target.segments(), target, f)?;
        let revision = current.revision() + 1;
        *current = Arc::new(Snapshot::new(root, revision));
        Ok(())
    }
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotSource for ContentStore {
    fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }
}

fn split(path: &NodePath) -> Result<(NodePath, String)> {
    match (path.parent(), path.name()) {
        (Some(parent), Some(name)) => Ok((parent, name.to_string())),
        _ => Err(CoreError::Invalid("the root node cannot be replaced or removed".to_string())),
    }
}

/// Copies the nodes along `segments` and applies `f` to the last one
fn rebuild<F>(
    state: &Arc<NodeState>,
    segments: &[String],
    target: &NodePath,
    f: F,
) -> Result<Arc<NodeState>>
where
    F: FnOnce(&mut NodeState) -> Result<()>,
{
    let mut copy = NodeState::clone(state);
    match segments.split_first() {
        None => f(&mut copy)?,
        Some((head, rest)) => {
            let child = state
                .child(head)
                .ok_or_else(|| CoreError::NotFound(target.to_string()))?;
            let rebuilt = rebuild(child, rest, target, f)?;
            copy.set_child(head.clone(), rebuilt);
        }
    }
    Ok(Arc::new(copy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> NodePath {
        NodePath::parse(s).unwrap()
    }

    #[test]
    fn test_add_and_read() {
        let store = ContentStore::new();
        store.add_node(&path("/content"), NodeState::builder()).unwrap();
        store
            .add_node(&path("/content/dam"), NodeState::builder().property("t", "x"))
            .unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.revision(), 2);
        let dam = snapshot.tree(&path("/content/dam"));
        assert_eq!(dam.property("t").and_then(PropertyValue::as_str), Some("x"));
    }

    #[test]
    fn test_add_requires_parent() {
        let store = ContentStore::new();
        let result = store.add_node(&path("/a/b"), NodeState::builder());
        assert!(matches!(result, Err(CoreError::NotFound(_))));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_root_cannot_be_removed() {
        let store = ContentStore::new();
        assert!(matches!(store.remove(&NodePath::root()), Err(CoreError::Invalid(_))));
    }

    #[test]
    fn test_snapshots_are_isolated() {
        let store = ContentStore::new();
        store.add_node(&path("/a"), NodeState::builder()).unwrap();
        let old = store.snapshot();

        store.set_property(&path("/a"), "k", "v").unwrap();
        store.remove(&path("/a")).unwrap_or(());

        assert!(old.tree(&path("/a")).exists());
        assert!(!old.tree(&path("/a")).has_property("k"));
        assert!(!store.snapshot().tree(&path("/a")).exists());
    }

    #[test]
    fn test_unchanged_subtrees_are_shared() {
        let store = ContentStore::new();
        store.add_node(&path("/a"), NodeState::builder()).unwrap();
        store.add_node(&path("/b"), NodeState::builder()).unwrap();
        let before = store.snapshot();

        store.set_property(&path("/a"), "k", "v").unwrap();
        let after = store.snapshot();

        let b_before = before.state(&path("/b")).unwrap();
        let b_after = after.state(&path("/b")).unwrap();
        assert!(Arc::ptr_eq(&b_before, &b_after));
    }

    #[test]
    fn test_remove_property() {
        let store = ContentStore::new();
        store
            .add_node(&path("/a"), NodeState::builder().property("k", "v"))
            .unwrap();
        store.remove_property(&path("/a"), "k").unwrap();
        assert!(!store.snapshot().tree(&path("/a")).has_property("k"));
        assert!(store.remove_property(&path("/a"), "k").is_err());
    }
}
