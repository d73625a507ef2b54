//! # AssetGuard Authorization
//!
//! Ownership-based read access for digital assets in a hierarchical content
//! store, packaged as one provider in an aggregated permission framework.
//!
//! ## Features
//!
//! - **Abstains outside the asset mount** so other providers decide there
//! - **Nearest-asset resolution** for renditions and metadata below an asset
//! - **Pluggable ownership rule** scoped to a configured region of the mount
//! - **Per-node decision handles** derived lazily while walking the hierarchy
//! - **Snapshot isolation** with atomic refresh between queries
//!
//! ## Example
//!
//! ```rust
//! use assetguard_authz::{
//!     AggregatedPermissionProvider, AssetPermissionProvider, PrincipalSet, ProviderConfig,
//!     TreePermission,
//! };
//! use assetguard_core::{ContentStore, NodePath, NodeState, Tree};
//! use std::sync::Arc;
//!
//! let store = Arc::new(ContentStore::new());
//! for path in ["/content", "/content/dam", "/content/dam/poc"] {
//!     store.add_node(&NodePath::parse(path).unwrap(), NodeState::builder()).unwrap();
//! }
//! store
//!     .add_node(
//!         &NodePath::parse("/content/dam/poc/logo.png").unwrap(),
//!         NodeState::builder().property("jcr:primaryType", "dam:Asset"),
//!     )
//!     .unwrap();
//!
//! let provider = AssetPermissionProvider::new(
//!     &ProviderConfig::default(),
//!     PrincipalSet::from_names(["alice"]),
//!     store,
//!     Arc::new(|principals: &PrincipalSet, _asset: &Tree| principals.contains_name("alice")),
//! );
//!
//! let asset = provider.tree(&NodePath::parse("/content/dam/poc/logo.png").unwrap());
//! let handle = provider.tree_permission(&asset, &TreePermission::NoRecourse);
//! assert!(handle.can_read());
//! ```

pub mod types;
pub mod error;
pub mod permissions;
pub mod config;
pub mod tree;
pub mod ownership;
pub mod provider;
pub mod configuration;

// Re-export commonly used types
pub use types::{Principal, PrincipalKind, PrincipalSet};
pub use error::{AuthzError, Result};
pub use permissions::{Permissions, PrivilegeBits, RepositoryPermission};
pub use config::{AssetGuardConfig, AuthorizationConfig, DeploymentMode, ProviderConfig};
pub use tree::{AncestorAssetResolver, NodeClassification, NodeClassifier};
pub use ownership::{NeverOwner, OwnershipEvaluator, ScopedOwnership};
pub use provider::{
    AggregatedPermissionProvider, AllowAllProvider, AssetPermissionProvider, Decision,
    DecisionPipeline, NodeScope, TreePermission,
};
pub use configuration::AuthorizationConfiguration;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
