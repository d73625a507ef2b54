//! Immutable, snapshot-based view of the hierarchical content store

pub mod node;
pub mod snapshot;
pub mod content;

pub use node::{NodeBuilder, NodeState};
pub use snapshot::{Snapshot, Tree, TreeLocation};
pub use content::ContentStore;
