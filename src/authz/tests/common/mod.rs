//! Shared fixtures for provider integration tests

#![allow(dead_code)]

use assetguard_authz::ownership::AssetMetadata;
use assetguard_authz::{AssetPermissionProvider, OwnershipEvaluator, PrincipalSet, ProviderConfig};
use assetguard_core::{ContentStore, NodeBuilder, NodePath, NodeState, Tree};
use std::sync::Arc;

/// Installs a test subscriber honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Provider settings for a store mounted at `/store/assets`
pub fn store_config() -> ProviderConfig {
    let mut config = ProviderConfig::for_mount("/store/assets", "/store/assets").unwrap();
    config.content_marker = "content".to_string();
    config.owner_privileges = vec!["jcr:read".to_string(), "rep:write".to_string()];
    config
}

/// An asset with `owners` recorded in its metadata
pub fn asset(owners: &[&str]) -> NodeBuilder {
    NodeState::builder()
        .property("jcr:primaryType", "dam:Asset")
        .child(
            "content",
            NodeState::builder()
                .child(
                    "metadata",
                    NodeState::builder().property("dam:owners", owners.to_vec()),
                )
                .child(
                    "renditions",
                    NodeState::builder()
                        .child("thumb.png", NodeState::builder())
                        .child("web.jpg", NodeState::builder()),
                ),
        )
}

pub fn folder() -> NodeBuilder {
    NodeState::builder().property("jcr:primaryType", "sling:Folder")
}

/// ```text
/// /store
///   assets
///     projA            asset, owned by alice
///       content/{metadata, renditions/{thumb.png, web.jpg}}
///       rep:policy     access control list
///     projB            asset, owned by bob
///     shared           folder
///       img.png        asset, owned by alice and editors
///         meta
///   other/x
/// /:hidden/y
/// ```
pub fn store() -> Arc<ContentStore> {
    let assets = folder()
        .child(
            "projA",
            asset(&["alice"]).child(
                "rep:policy",
                NodeState::builder().property("jcr:primaryType", "rep:ACL"),
            ),
        )
        .child("projB", asset(&["bob"]))
        .child(
            "shared",
            folder().child(
                "img.png",
                asset(&["alice", "editors"]).child("meta", NodeState::builder()),
            ),
        );
    let root = NodeState::builder()
        .child(
            "store",
            NodeState::builder()
                .child("assets", assets)
                .child("other", NodeState::builder().child("x", NodeState::builder())),
        )
        .child(":hidden", NodeState::builder().child("y", NodeState::builder()))
        .build();
    Arc::new(ContentStore::with_root(root))
}

/// Owners are the principals named in the asset's `dam:owners` metadata
pub fn metadata_owners(config: &ProviderConfig) -> Arc<dyn OwnershipEvaluator> {
    let metadata = AssetMetadata::new(config);
    Arc::new(move |principals: &PrincipalSet, asset: &Tree| {
        metadata
            .values(asset, "dam:owners")
            .iter()
            .any(|owner| principals.contains_name(owner))
    })
}

pub fn provider(store: &Arc<ContentStore>, principals: &[&str]) -> AssetPermissionProvider {
    let config = store_config();
    AssetPermissionProvider::new(
        &config,
        PrincipalSet::from_names(principals.iter().copied()),
        store.clone(),
        metadata_owners(&config),
    )
}

pub fn path(p: &str) -> NodePath {
    NodePath::parse(p).unwrap()
}
