//! Ownership evaluation
//!
//! Whether a principal set owns an asset is a business rule supplied by the
//! deployment. This module defines the seam ([`OwnershipEvaluator`]), the
//! region scoping every evaluator is subject to ([`ScopedOwnership`]) and a
//! fail-closed reader for asset metadata ([`AssetMetadata`]).
//!
//! # Example
//!
//! ```rust
//! use assetguard_authz::ownership::{AssetMetadata, OwnershipEvaluator};
//! use assetguard_authz::{PrincipalSet, ProviderConfig};
//! use assetguard_core::Tree;
//!
//! let metadata = AssetMetadata::new(&ProviderConfig::default());
//! let by_owner_field = move |principals: &PrincipalSet, asset: &Tree| {
//!     metadata
//!         .values(asset, "dam:owners")
//!         .iter()
//!         .any(|owner| principals.contains_name(owner))
//! };
//! # let _: &dyn OwnershipEvaluator = &by_owner_field;
//! ```

mod metadata;
mod scoped;

pub use metadata::AssetMetadata;
pub use scoped::ScopedOwnership;

use assetguard_core::Tree;

use crate::types::PrincipalSet;

/// Decides whether a principal set owns an asset
///
/// Implementations must be pure and deterministic for a given snapshot (the
/// asset tree carries its snapshot), must not have side effects, and must
/// fail closed: missing or malformed data means "not owner".
pub trait OwnershipEvaluator: Send + Sync {
    /// True if `principals` own `asset`
    fn is_owner(&self, principals: &PrincipalSet, asset: &Tree) -> bool;
}

/// Evaluator that never grants ownership
///
/// The default until a deployment installs its own rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverOwner;

impl OwnershipEvaluator for NeverOwner {
    fn is_owner(&self, _principals: &PrincipalSet, _asset: &Tree) -> bool {
        false
    }
}

impl<F> OwnershipEvaluator for F
where
    F: Fn(&PrincipalSet, &Tree) -> bool + Send + Sync,
{
    fn is_owner(&self, principals: &PrincipalSet, asset: &Tree) -> bool {
        self(principals, asset)
    }
}
