//! Per-session provider selection

use assetguard_core::SnapshotSource;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{AssetGuardConfig, DeploymentMode};
use crate::ownership::OwnershipEvaluator;
use crate::provider::{AggregatedPermissionProvider, AllowAllProvider, AssetPermissionProvider};
use crate::types::{PrincipalKind, PrincipalSet};

/// Hands each session the provider it is subject to
///
/// On publish deployments ordinary sessions get an [`AssetPermissionProvider`].
/// Sessions carrying a system or admin principal, or a principal named in the
/// bypass list, get an [`AllowAllProvider`], as does every session on author
/// deployments.
///
/// # Examples
///
/// ```
/// use assetguard_authz::{AssetGuardConfig, AuthorizationConfiguration, NeverOwner, PrincipalSet};
/// use assetguard_core::ContentStore;
/// use std::sync::Arc;
///
/// let config = AssetGuardConfig::from_toml_str(
///     r#"
///     [authorization]
///     mode = "publish"
///     admin_user_ids = "admin,replication-service"
///     "#,
/// )
/// .unwrap();
/// let authorization = AuthorizationConfiguration::new(config, Arc::new(NeverOwner));
///
/// assert!(authorization.is_admin_or_system(&PrincipalSet::from_names(["admin"])));
/// assert!(!authorization.is_admin_or_system(&PrincipalSet::from_names(["alice"])));
///
/// let store = Arc::new(ContentStore::new());
/// let _provider = authorization.permission_provider(store, PrincipalSet::from_names(["alice"]));
/// ```
pub struct AuthorizationConfiguration {
    config: AssetGuardConfig,
    admin_ids: BTreeSet<String>,
    ownership: Arc<dyn OwnershipEvaluator>,
}

impl AuthorizationConfiguration {
    pub fn new(config: AssetGuardConfig, ownership: Arc<dyn OwnershipEvaluator>) -> Self {
        let admin_ids = config.authorization.admin_ids();
        info!(
            mode = ?config.authorization.mode,
            admin_user_ids = ?admin_ids,
            "Asset authorization configured"
        );
        Self {
            config,
            admin_ids,
            ownership,
        }
    }

    pub fn config(&self) -> &AssetGuardConfig {
        &self.config
    }

    pub fn mode(&self) -> DeploymentMode {
        self.config.authorization.mode
    }

    pub fn admin_ids(&self) -> &BTreeSet<String> {
        &self.admin_ids
    }

    /// True if any principal bypasses the asset provider
    pub fn is_admin_or_system(&self, principals: &PrincipalSet) -> bool {
        principals.contains_kind(PrincipalKind::System)
            || principals.iter().any(|principal| {
                principal.kind == PrincipalKind::Admin || self.admin_ids.contains(&principal.name)
            })
    }

    /// The provider for a session with `principals`
    pub fn permission_provider(
        &self,
        source: Arc<dyn SnapshotSource>,
        principals: PrincipalSet,
    ) -> Box<dyn AggregatedPermissionProvider> {
        if self.mode() != DeploymentMode::Publish {
            debug!(mode = ?self.mode(), "Asset provider inactive for this deployment");
            return Box::new(AllowAllProvider);
        }

        if self.is_admin_or_system(&principals) {
            debug!(principals = ?principals.names(), "Session bypasses asset provider");
            return Box::new(AllowAllProvider);
        }

        Box::new(AssetPermissionProvider::new(
            &self.config.provider,
            principals,
            source,
            Arc::clone(&self.ownership),
        ))
    }
}

impl std::fmt::Debug for AuthorizationConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationConfiguration")
            .field("config", &self.config)
            .field("admin_ids", &self.admin_ids)
            .finish_non_exhaustive()
    }
}
