//! Region scoping for ownership evaluators

use assetguard_core::{NodePath, Tree};
use std::sync::Arc;
use tracing::debug;

use super::OwnershipEvaluator;
use crate::types::PrincipalSet;

/// Restricts an evaluator to assets inside a region of the asset mount
///
/// Assets outside the region, and assets that do not exist in the snapshot,
/// are never owned; the wrapped rule is only consulted for the rest.
#[derive(Clone)]
pub struct ScopedOwnership {
    region: NodePath,
    rule: Arc<dyn OwnershipEvaluator>,
}

impl ScopedOwnership {
    pub fn new(region: NodePath, rule: Arc<dyn OwnershipEvaluator>) -> Self {
        Self { region, rule }
    }

    pub fn region(&self) -> &NodePath {
        &self.region
    }

    /// True if `asset` lies in the region this evaluator is scoped to
    pub fn covers(&self, asset: &Tree) -> bool {
        asset.path().is_same_or_descendant_of(&self.region)
    }
}

impl OwnershipEvaluator for ScopedOwnership {
    fn is_owner(&self, principals: &PrincipalSet, asset: &Tree) -> bool {
        if !asset.exists() {
            debug!(asset = %asset.path(), "Asset does not exist, ownership denied");
            return false;
        }
        if !self.covers(asset) {
            debug!(asset = %asset.path(), region = %self.region, "Asset outside ownership region");
            return false;
        }
        self.rule.is_owner(principals, asset)
    }
}

impl std::fmt::Debug for ScopedOwnership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedOwnership")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}
