//! Immutable node states

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::types::{PropertyState, PropertyValue};

/// Immutable state of a single node and its subtree
///
/// Children are shared through `Arc`, so publishing a new snapshot only
/// copies the nodes on the path from the root to the changed node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeState {
    properties: BTreeMap<String, PropertyValue>,
    children: BTreeMap<String, Arc<NodeState>>,
}

impl NodeState {
    /// Creates an empty node state
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a builder for a node state
    pub fn builder() -> NodeBuilder {
        NodeBuilder::default()
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Iterates over all properties as [`PropertyState`] values
    pub fn properties(&self) -> impl Iterator<Item = PropertyState> + '_ {
        self.properties
            .iter()
            .map(|(name, value)| PropertyState::new(name.clone(), value.clone()))
    }

    pub fn child(&self, name: &str) -> Option<&Arc<NodeState>> {
        self.children.get(name)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Child names in sorted order
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub(crate) fn set_property(&mut self, name: String, value: PropertyValue) {
        self.properties.insert(name, value);
    }

    pub(crate) fn remove_property(&mut self, name: &str) -> Option<PropertyValue> {
        self.properties.remove(name)
    }

    pub(crate) fn set_child(&mut self, name: String, child: Arc<NodeState>) {
        self.children.insert(name, child);
    }

    pub(crate) fn remove_child(&mut self, name: &str) -> Option<Arc<NodeState>> {
        self.children.remove(name)
    }
}

/// Fluent builder for [`NodeState`] trees
///
/// # Examples
///
/// ```
/// use assetguard_core::NodeState;
///
/// let asset = NodeState::builder()
///     .property("jcr:primaryType", "dam:Asset")
///     .child("jcr:content", NodeState::builder().child("metadata", NodeState::builder()))
///     .build();
///
/// assert!(asset.has_child("jcr:content"));
/// ```
#[derive(Debug, Default)]
pub struct NodeBuilder {
    state: NodeState,
}

impl NodeBuilder {
    /// Sets a property
    pub fn property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.state.set_property(name.into(), value.into());
        self
    }

    /// Adds (or replaces) a child subtree
    pub fn child(mut self, name: impl Into<String>, child: NodeBuilder) -> Self {
        self.state.set_child(name.into(), Arc::new(child.build()));
        self
    }

    pub fn build(self) -> NodeState {
        self.state
    }
}
