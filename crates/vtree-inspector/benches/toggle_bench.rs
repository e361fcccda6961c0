//! Benchmarks for list expand/collapse.
//!
//! Run with: cargo bench -p vtree-inspector

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use vtree_core::{NodeId, ViewArena, ViewSpec};
use vtree_inspector::ExpansionList;

/// Root with `width` leaf children.
fn wide(width: usize) -> (ViewArena, NodeId) {
    ViewArena::from_spec(
        ViewSpec::new("UIView")
            .with_children((0..width).map(|_| ViewSpec::new("UILabel")).collect()),
    )
}

/// A single chain `depth` views long.
fn deep(depth: usize) -> (ViewArena, NodeId) {
    let mut arena = ViewArena::new();
    let root = arena.insert_root(ViewSpec::new("UIView")).unwrap();
    let mut tip = root;
    for _ in 1..depth {
        tip = arena.add_child(tip, ViewSpec::new("UIView")).unwrap();
    }
    (arena, root)
}

/// Expand every row of a list, front to back.
fn expand_all(arena: &ViewArena, list: &mut ExpansionList) {
    let mut index = 0;
    while index < list.count() {
        if !list.get(index).unwrap().is_expanded() {
            list.toggle(arena, index);
        }
        index += 1;
    }
}

// ============================================================================
// Wide hierarchies: one splice of many rows
// ============================================================================

fn bench_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("toggle/wide");

    for width in [10, 100, 1_000, 10_000] {
        let (arena, root) = wide(width);

        group.bench_with_input(BenchmarkId::new("expand_collapse", width), &(), |b, _| {
            let mut list = ExpansionList::new(&arena, root);
            b.iter(|| {
                list.toggle(&arena, 0);
                list.toggle(&arena, 0);
                black_box(list.count());
            })
        });

        // Expanding a row near the end of a long list shifts only the tail.
        let (nested, nested_root) = ViewArena::from_spec(
            ViewSpec::new("UIView").with_children(
                (0..width)
                    .map(|_| ViewSpec::new("UIView").child(ViewSpec::new("UILabel")))
                    .collect(),
            ),
        );
        group.bench_with_input(BenchmarkId::new("toggle_middle_row", width), &(), |b, _| {
            let mut list = ExpansionList::new(&nested, nested_root);
            list.toggle(&nested, 0);
            let middle = width / 2;
            b.iter(|| {
                list.toggle(&nested, middle);
                list.toggle(&nested, middle);
                black_box(list.count());
            })
        });
    }

    group.finish();
}

// ============================================================================
// Deep hierarchies: many single-row expansions, one big collapse
// ============================================================================

fn bench_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("toggle/deep");

    for depth in [10, 100, 1_000] {
        let (arena, root) = deep(depth);

        group.bench_with_input(BenchmarkId::new("expand_all", depth), &(), |b, _| {
            b.iter(|| {
                let mut list = ExpansionList::new(&arena, root);
                expand_all(&arena, &mut list);
                black_box(list.count());
            })
        });

        group.bench_with_input(BenchmarkId::new("collapse_root", depth), &(), |b, _| {
            let mut expanded = ExpansionList::new(&arena, root);
            expand_all(&arena, &mut expanded);
            b.iter(|| {
                let mut list = expanded.clone();
                list.toggle(&arena, 0);
                black_box(list.count());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_wide, bench_deep);
criterion_main!(benches);
