//! Property-based invariant tests for the view arena.
//!
//! 1. Every view in a spec gets exactly one handle.
//! 2. Children come back in spec order with matching names.
//! 3. Parent links mirror child lists.
//! 4. Attributes round-trip verbatim, including non-finite values.

use proptest::prelude::*;
use vtree_core::{NodeId, Rect, ViewArena, ViewSpec, ViewTree};

// ── Helpers ─────────────────────────────────────────────────────────────

fn frame_strategy() -> impl Strategy<Value = Rect> {
    (
        prop_oneof![Just(f64::NAN), Just(-1e12), -500.0f64..500.0],
        -500.0f64..500.0,
        prop_oneof![Just(0.0), Just(f64::INFINITY), -10.0f64..1000.0],
        0.0f64..1000.0,
    )
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn spec_strategy() -> impl Strategy<Value = ViewSpec> {
    let leaf = (
        "[A-Z][a-z]{0,6}",
        frame_strategy(),
        any::<bool>(),
        -1.0f64..2.0,
    )
        .prop_map(|(name, frame, hidden, alpha)| {
            ViewSpec::new(name)
                .with_frame(frame)
                .with_hidden(hidden)
                .with_alpha(alpha)
        });
    leaf.prop_recursive(5, 64, 6, |inner| {
        (inner.clone(), prop::collection::vec(inner, 0..6))
            .prop_map(|(parent, children)| parent.with_children(children))
    })
}

fn assert_matches(arena: &ViewArena, id: NodeId, spec: &ViewSpec) -> Result<(), TestCaseError> {
    prop_assert_eq!(arena.display_name(id), spec.name());
    let children = arena.children(id);
    prop_assert_eq!(children.len(), spec.children().len());
    for (child, child_spec) in children.iter().zip(spec.children()) {
        prop_assert_eq!(arena.parent(*child), Some(id));
        assert_matches(arena, *child, child_spec)?;
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1–3. Structure mirrors the spec
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arena_mirrors_spec(spec in spec_strategy()) {
        let (arena, root) = ViewArena::from_spec(spec.clone());
        prop_assert_eq!(arena.len(), spec.subtree_len());
        prop_assert_eq!(arena.parent(root), None);
        assert_matches(&arena, root, &spec)?;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Attributes are stored verbatim
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn attributes_round_trip(
        frame in frame_strategy(),
        hidden in any::<bool>(),
        alpha in -5.0f64..5.0,
    ) {
        let (arena, root) = ViewArena::from_spec(
            ViewSpec::new("UIView")
                .with_frame(frame)
                .with_hidden(hidden)
                .with_alpha(alpha),
        );
        let got = arena.frame(root);
        // NaN != NaN, so compare bit patterns.
        prop_assert_eq!(got.x.to_bits(), frame.x.to_bits());
        prop_assert_eq!(got.y.to_bits(), frame.y.to_bits());
        prop_assert_eq!(got.width.to_bits(), frame.width.to_bits());
        prop_assert_eq!(got.height.to_bits(), frame.height.to_bits());
        prop_assert_eq!(arena.is_hidden(root), hidden);
        prop_assert_eq!(arena.alpha(root), alpha);
    }
}
