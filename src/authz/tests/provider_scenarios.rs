//! End-to-end provider behaviour over a fixture store
//!
//! Walks handles the way the host aggregator does: from the root down,
//! deriving each child's handle from its parent's.

mod common;

use assetguard_authz::{
    AggregatedPermissionProvider, Decision, NodeClassification, Permissions, PrivilegeBits,
    RepositoryPermission, TreePermission,
};
use assetguard_core::{NodeState, SnapshotSource};
use common::{asset, init_tracing, path, provider, store};
use std::collections::BTreeSet;

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_owner_reads_asset_and_its_children() {
    init_tracing();
    let store = store();
    let alice = provider(&store, &["alice"]);

    let asset = alice.resolve(&path("/store/assets/shared/img.png"));
    assert!(matches!(asset, TreePermission::GrantAll(_)));

    let meta = alice.resolve(&path("/store/assets/shared/img.png/meta"));
    assert!(matches!(meta, TreePermission::GrantAll(_)));
    assert!(meta.can_read_all());
}

#[test]
fn test_outside_mount_abstains_for_anyone() {
    let store = store();
    let sessions: [&[&str]; 4] = [&["alice"], &["bob"], &[], &["editors", "everyone"]];
    for principals in sessions {
        let provider = provider(&store, principals);
        let handle = provider.resolve(&path("/store/other/x"));
        assert!(handle.is_no_recourse(), "for {:?}", principals);
        assert_eq!(handle.decision(), Decision::Abstain);
    }
}

#[test]
fn test_content_descendants_anchor_to_asset() {
    let store = store();
    let alice = provider(&store, &["alice"]);
    let resolver = alice.pipeline().resolver();

    let asset = alice.tree(&path("/store/assets/projA"));
    let metadata = alice.tree(&path("/store/assets/projA/content/metadata"));

    assert_eq!(resolver.find_ancestor_asset(&asset).unwrap().path(), asset.path());
    assert_eq!(resolver.find_ancestor_asset(&metadata).unwrap().path(), asset.path());
}

#[test]
fn test_folder_denies_itself_but_not_its_children() {
    let store = store();
    let snapshot = store.snapshot();

    for (principal, child_reads) in [("alice", true), ("bob", false)] {
        let provider = provider(&store, &[principal]);
        let mount = provider.resolve(&path("/store/assets"));
        assert!(matches!(mount, TreePermission::DenyAll(_)));
        assert!(!mount.can_read());

        let state = snapshot.state(&path("/store/assets/projA")).unwrap();
        let child = mount.child_permission("projA", &state);
        assert_eq!(child.can_read(), child_reads, "for {}", principal);
    }
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn test_non_ordinary_nodes_abstain() {
    let store = store();
    let alice = provider(&store, &["alice"]);

    for p in ["/store/assets/projA/rep:policy", "/:hidden/y"] {
        let tree = alice.tree(&path(p));
        assert!(alice.tree_permission(&tree, &TreePermission::Unrestricted).is_no_recourse());
        assert!(alice.resolve(&path(p)).is_no_recourse(), "for {}", p);
        assert!(alice
            .supported_permissions(Some(&tree), None, Permissions::ALL)
            .is_empty());
        assert!(alice
            .supported_privileges(Some(&tree), PrivilegeBits::JCR_ALL)
            .is_empty());
        assert!(alice.privileges(Some(&tree)).is_empty());
    }

    // derivation through the owning asset still abstains for its policy node
    let snapshot = store.snapshot();
    let policy = snapshot.state(&path("/store/assets/projA/rep:policy")).unwrap();
    let delegated = provider(&store, &["bob"]).resolve(&path("/store/assets/projA"));
    assert!(delegated.child_permission("rep:policy", &policy).is_no_recourse());

    let owned = alice.resolve(&path("/store/assets/projA"));
    assert!(matches!(owned, TreePermission::GrantAll(_)));
    let derived = owned.child_permission("rep:policy", &policy);
    assert!(derived.is_no_recourse());
    assert!(!derived.can_read());
    assert!(alice
        .supported_permissions_handle(&derived, None, Permissions::READ)
        .is_empty());
    assert!(derived
        .missing_child_permission("rep:GrantACE")
        .is_no_recourse());

    let tree = alice.tree(&path("/store/assets/projA"));
    let typed = alice.tree_permission_typed(
        &tree,
        NodeClassification::AccessControlMetadata,
        &TreePermission::NoRecourse,
    );
    assert!(typed.is_no_recourse());
}

#[test]
fn test_ownership_is_isolated_per_asset() {
    let store = store();
    let alice = provider(&store, &["alice"]);

    for p in [
        "/store/assets/projA",
        "/store/assets/projA/content",
        "/store/assets/projA/content/metadata",
        "/store/assets/projA/content/renditions/thumb.png",
        "/store/assets/projA/content/renditions/web.jpg",
    ] {
        assert!(matches!(alice.resolve(&path(p)), TreePermission::GrantAll(_)), "for {}", p);
    }

    for p in [
        "/store/assets/projB",
        "/store/assets/projB/content/metadata",
        "/store/assets/projB/content/renditions/thumb.png",
    ] {
        let handle = alice.resolve(&path(p));
        assert!(!handle.can_read(), "for {}", p);
        assert!(!alice.is_granted(&alice.tree(&path(p)), None, Permissions::READ));
    }
}

#[test]
fn test_group_membership_grants() {
    let store = store();
    let editor = provider(&store, &["carol", "editors"]);

    assert!(editor.resolve(&path("/store/assets/shared/img.png")).can_read());
    assert!(!editor.resolve(&path("/store/assets/projA")).can_read());
}

#[test]
fn test_refresh_observes_mutations() {
    let store = store();
    let bob = provider(&store, &["bob"]);
    let target = path("/store/assets/projC");

    store.add_node(&target, asset(&["bob"])).unwrap();
    assert!(!bob.is_granted_path("/store/assets/projC", "read"));

    bob.refresh();
    assert!(bob.is_granted_path("/store/assets/projC", "read"));

    bob.refresh();
    assert!(bob.is_granted_path("/store/assets/projC", "read"));
    assert!(bob.resolve(&target).can_read());

    store
        .set_property(
            &path("/store/assets/projC/content/metadata"),
            "dam:owners",
            vec!["alice"],
        )
        .unwrap();
    assert!(bob.resolve(&target).can_read());
    bob.refresh();
    assert!(!bob.resolve(&target).can_read());
}

#[test]
fn test_privileges_are_all_or_nothing() {
    let store = store();
    let alice = provider(&store, &["alice"]);
    let full: BTreeSet<String> = ["jcr:read", "rep:write"].iter().map(|s| s.to_string()).collect();

    let owned = alice.tree(&path("/store/assets/projA/content/metadata"));
    let foreign = alice.tree(&path("/store/assets/projB"));

    assert_eq!(alice.privileges(Some(&owned)), full);
    assert!(alice.privileges(Some(&foreign)).is_empty());
    assert!(alice.has_privileges(Some(&owned), &["jcr:read"]));
    assert!(!alice.has_privileges(Some(&foreign), &["jcr:read"]));
    assert!(!alice.has_privileges(None, &["jcr:read"]));
}

// ============================================================================
// OPERATION TABLE
// ============================================================================

#[test]
fn test_repository_level_is_never_decided() {
    let store = store();
    let alice = provider(&store, &["alice"]);

    assert_eq!(alice.repository_permission(), RepositoryPermission::EMPTY);
    assert!(!alice.repository_permission().is_granted(Permissions::READ));
    assert!(alice.supported_permissions(None, None, Permissions::READ).is_empty());
    assert!(alice.supported_privileges(None, PrivilegeBits::JCR_READ).is_empty());
}

#[test]
fn test_supported_permissions_need_an_anchor() {
    let store = store();
    let bob = provider(&store, &["bob"]);
    let snapshot = bob.snapshot();

    let anchored = bob.tree(&path("/store/assets/projA/content/renditions"));
    let folder = bob.tree(&path("/store/assets/shared"));
    let outside = bob.tree(&path("/store/other/x"));

    assert_eq!(
        bob.supported_permissions(Some(&anchored), None, Permissions::READ),
        Permissions::READ
    );
    assert!(bob.supported_permissions(Some(&folder), None, Permissions::READ).is_empty());
    assert!(bob.supported_permissions(Some(&outside), None, Permissions::READ).is_empty());

    let property = snapshot.location(&path("/store/assets/projB/jcr:primaryType"));
    assert_eq!(
        bob.supported_permissions_location(Some(&property), Permissions::READ_PROPERTY),
        Permissions::READ_PROPERTY
    );
    assert_eq!(
        bob.supported_privileges(Some(&anchored), PrivilegeBits::JCR_READ),
        PrivilegeBits::JCR_ALL
    );
}

#[test]
fn test_empty_requests_short_circuit() {
    let store = store();
    let bob = provider(&store, &["bob"]);
    let snapshot = bob.snapshot();
    let anything = snapshot.location(&path("/store/assets/projB"));

    assert!(bob
        .supported_permissions_location(Some(&anything), Permissions::NO_PERMISSION)
        .is_empty());
    assert!(bob
        .supported_permissions_handle(
            &bob.resolve(&path("/store/assets/projB")),
            None,
            Permissions::NO_PERMISSION
        )
        .is_empty());
    assert!(bob
        .supported_privileges(Some(&bob.tree(&path("/store/assets/projB"))), PrivilegeBits::EMPTY)
        .is_empty());
}

#[test]
fn test_granted_by_path_and_actions() {
    let store = store();
    let alice = provider(&store, &["alice"]);

    assert!(alice.is_granted_path("/store/assets/projA/content/metadata", "read"));
    assert!(alice.is_granted_path("/store/assets/projA/content/metadata/dam:owners", "read"));
    assert!(alice.is_granted_path("/store/assets/projA/content/renditions/new.png", "add_node"));
    assert!(!alice.is_granted_path("/store/assets/projB", "read"));
    assert!(!alice.is_granted_path("/store/other/x", "read"));
    assert!(!alice.is_granted_path("", "read"));
}

#[test]
fn test_delegate_follows_parent_decision() {
    let store = store();
    let bob = provider(&store, &["bob"]);

    let parent = TreePermission::Unrestricted;
    let tree = bob.tree(&path("/store/assets/projA"));
    let handle = bob.tree_permission(&tree, &parent);
    assert!(matches!(handle, TreePermission::Delegate { .. }));
    assert!(handle.can_read());

    // nested delegates forward to the same deciding handle
    let content_state = NodeState::builder().build();
    let child = handle.child_permission("content", &std::sync::Arc::new(content_state));
    assert!(matches!(child, TreePermission::Delegate { .. }));
    assert_eq!(child.decision(), Decision::Grant);
}
