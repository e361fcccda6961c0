#![forbid(unsafe_code)]

//! Whole-hierarchy helpers.
//!
//! Unlike the expansion list these walk every descendant of `root`
//! eagerly. All traversals are pre-order in host child order.

use std::fmt::Write as _;

use vtree_core::{NodeId, Rect, ViewTree};

/// Guide segments for [`dump_tree`].
const VERTICAL: &str = "\u{2502}   ";
const BRANCH: &str = "\u{251C}\u{2500}\u{2500} ";
const LAST: &str = "\u{2514}\u{2500}\u{2500} ";
const SPACE: &str = "    ";

/// A node's outline for border highlighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineRegion {
    pub node: NodeId,
    /// Frame in root coordinates.
    pub frame: Rect,
    pub depth: usize,
}

/// Text dump of every node under `root`, one line per node, drawn with
/// box-drawing guides.
///
/// ```text
/// UIView (0.0, 0.0, 375.0, 812.0)
/// ├── UIView (50.0, 100.0, 200.0, 150.0)
/// │   └── UILabel (10.0, 30.0, 80.0, 20.0) [hidden]
/// └── UIButton (87.5, 712.0, 200.0, 50.0)
/// ```
pub fn dump_tree<T: ViewTree + ?Sized>(tree: &T, root: NodeId) -> String {
    let _span = tracing::debug_span!("dump_tree", root = root.raw()).entered();
    let mut out = String::new();
    dump_node(tree, root, &mut Vec::new(), &mut out);
    out
}

fn dump_node<T: ViewTree + ?Sized>(
    tree: &T,
    node: NodeId,
    is_last: &mut Vec<bool>,
    out: &mut String,
) {
    let depth = is_last.len();
    for (d, &last) in is_last.iter().enumerate() {
        let guide = if d + 1 == depth {
            if last { LAST } else { BRANCH }
        } else if last {
            SPACE
        } else {
            VERTICAL
        };
        out.push_str(guide);
    }
    let _ = write!(out, "{} {}", tree.display_name(node), tree.frame(node));
    if tree.is_hidden(node) {
        out.push_str(" [hidden]");
    }
    out.push('\n');

    let children = tree.children(node);
    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        is_last.push(i + 1 == count);
        dump_node(tree, child, is_last, out);
        is_last.pop();
    }
}

/// Every node under `root` (inclusive) whose display name equals `name`.
pub fn find_by_name<T: ViewTree + ?Sized>(tree: &T, root: NodeId, name: &str) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if tree.display_name(node) == name {
            found.push(node);
        }
        stack.extend(tree.children(node).into_iter().rev());
    }
    found
}

/// Frame of `node` in the coordinate space of `root`.
///
/// Frames are parent-relative, so this sums the origins of every ancestor
/// between `root` and `node`. The root itself maps to its own bounds at the
/// origin. Returns `None` when `node` is not under `root`.
pub fn absolute_frame<T: ViewTree + ?Sized>(tree: &T, root: NodeId, node: NodeId) -> Option<Rect> {
    if node == root {
        let frame = tree.frame(root);
        return Some(Rect::from_size(frame.width, frame.height));
    }

    // (node, origin of node's parent in root coordinates)
    let mut stack: Vec<(NodeId, f64, f64)> = tree
        .children(root)
        .into_iter()
        .rev()
        .map(|child| (child, 0.0, 0.0))
        .collect();
    while let Some((current, dx, dy)) = stack.pop() {
        let frame = tree.frame(current).translate(dx, dy);
        if current == node {
            return Some(frame);
        }
        stack.extend(
            tree.children(current)
                .into_iter()
                .rev()
                .map(|child| (child, frame.x, frame.y)),
        );
    }
    None
}

/// Outlines of every visible node under `root`, in pre-order.
///
/// A hidden view hides its whole subtree, so its descendants are skipped.
pub fn outline_regions<T: ViewTree + ?Sized>(tree: &T, root: NodeId) -> Vec<OutlineRegion> {
    let mut regions = Vec::new();
    if tree.is_hidden(root) {
        return regions;
    }
    let bounds = tree.frame(root);
    regions.push(OutlineRegion {
        node: root,
        frame: Rect::from_size(bounds.width, bounds.height),
        depth: 0,
    });

    let mut stack: Vec<(NodeId, f64, f64, usize)> = tree
        .children(root)
        .into_iter()
        .rev()
        .map(|child| (child, 0.0, 0.0, 1))
        .collect();
    while let Some((node, dx, dy, depth)) = stack.pop() {
        if tree.is_hidden(node) {
            continue;
        }
        let frame = tree.frame(node).translate(dx, dy);
        regions.push(OutlineRegion { node, frame, depth });
        stack.extend(
            tree.children(node)
                .into_iter()
                .rev()
                .map(|child| (child, frame.x, frame.y, depth + 1)),
        );
    }
    regions
}
