//! Benchmarks for handle derivation
//!
//! Measures performance of:
//! - Walking handles from the root to a deep rendition
//! - Direct tree permission evaluation
//! - Ancestor asset resolution depth

use assetguard_authz::{
    AggregatedPermissionProvider, AssetPermissionProvider, PrincipalSet, ProviderConfig,
    TreePermission,
};
use assetguard_core::{ContentStore, NodeBuilder, NodePath, NodeState, Tree};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

fn nested(depth: usize) -> NodeBuilder {
    (0..depth).rev().fold(NodeState::builder(), |child, level| {
        NodeState::builder().child(format!("level{}", level), child)
    })
}

fn fixture(depth: usize, assets: usize) -> (AssetPermissionProvider, NodePath) {
    let mut poc = NodeState::builder();
    for i in 0..assets {
        poc = poc.child(
            format!("asset{}", i),
            NodeState::builder()
                .property("jcr:primaryType", "dam:Asset")
                .child("jcr:content", nested(depth)),
        );
    }
    let root = NodeState::builder()
        .child(
            "content",
            NodeState::builder().child("dam", NodeState::builder().child("poc", poc)),
        )
        .build();
    let store = Arc::new(ContentStore::with_root(root));

    let provider = AssetPermissionProvider::new(
        &ProviderConfig::default(),
        PrincipalSet::from_names(["alice"]),
        store,
        Arc::new(|_: &PrincipalSet, asset: &Tree| asset.name() == Some("asset0")),
    );

    let mut deep = format!("/content/dam/poc/asset{}/jcr:content", assets - 1);
    for level in 0..depth {
        deep.push_str(&format!("/level{}", level));
    }
    let deep = NodePath::parse(&deep).expect("valid path");
    (provider, deep)
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for depth in [2usize, 8, 32] {
        let (provider, deep) = fixture(depth, 16);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &deep, |b, p| {
            b.iter(|| provider.resolve(black_box(p)))
        });
    }

    group.finish();
}

fn bench_tree_permission(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_permission");

    for depth in [2usize, 8, 32] {
        let (provider, deep) = fixture(depth, 16);
        let tree = provider.tree(&deep);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &tree, |b, t| {
            b.iter(|| provider.tree_permission(black_box(t), &TreePermission::NoRecourse))
        });
    }

    group.finish();
}

fn bench_privileges(c: &mut Criterion) {
    let (provider, deep) = fixture(8, 64);
    let tree = provider.tree(&deep);

    c.bench_function("privileges_deep_rendition", |b| {
        b.iter(|| provider.privileges(black_box(Some(&tree))))
    });
}

criterion_group!(benches, bench_resolve, bench_tree_permission, bench_privileges);
criterion_main!(benches);
