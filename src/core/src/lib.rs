//! # AssetGuard Core
//!
//! Hierarchical content store model shared by the authorization crates:
//! absolute node paths, typed properties, immutable snapshots and the
//! read-only trees they expose.
//!
//! ## Example
//!
//! ```rust
//! use assetguard_core::{ContentStore, NodePath, NodeState, SnapshotSource};
//!
//! let store = ContentStore::new();
//! store.add_node(&NodePath::parse("/content").unwrap(), NodeState::builder()).unwrap();
//!
//! let snapshot = store.snapshot();
//! let tree = snapshot.tree(&NodePath::parse("/content").unwrap());
//! assert!(tree.exists());
//! ```

pub mod types;
pub mod traits;
pub mod store;
pub mod error;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{NodePath, PropertyState, PropertyValue};
pub use store::{ContentStore, NodeBuilder, NodeState, Snapshot, Tree, TreeLocation};
pub use traits::SnapshotSource;
