#![forbid(unsafe_code)]

//! Rows of the flattened hierarchy.

use vtree_core::{NodeAttributes, NodeId, Rect, ViewTree};

/// One row of the flat list.
///
/// Display attributes are captured when the entry is created and are not
/// refreshed afterwards. Only [`EntryView::has_children`] reads the live
/// hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    node: NodeId,
    depth: usize,
    /// Whether this row's children are currently inserted below it.
    pub(crate) expanded: bool,
    attributes: NodeAttributes,
}

impl ListEntry {
    /// Capture a collapsed entry for `node` at `depth`.
    pub fn capture<T: ViewTree + ?Sized>(tree: &T, node: NodeId, depth: usize) -> Self {
        Self {
            node,
            depth,
            expanded: false,
            attributes: tree.attributes(node),
        }
    }

    /// Handle of the represented view.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Distance from the root row.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the row is expanded.
    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Class name captured at creation.
    #[inline]
    pub fn display_name(&self) -> &str {
        &self.attributes.display_name
    }

    /// Frame captured at creation.
    #[inline]
    pub fn frame(&self) -> Rect {
        self.attributes.frame
    }

    /// Hidden flag captured at creation.
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.attributes.hidden
    }

    /// Opacity captured at creation.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.attributes.alpha
    }

    /// All captured attributes.
    #[inline]
    pub fn attributes(&self) -> &NodeAttributes {
        &self.attributes
    }
}

/// Read-only view of a row handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct EntryView<'a> {
    entry: &'a ListEntry,
    has_children: bool,
}

impl<'a> EntryView<'a> {
    pub(crate) fn new<T: ViewTree + ?Sized>(entry: &'a ListEntry, tree: &T) -> Self {
        Self {
            entry,
            has_children: tree.has_children(entry.node),
        }
    }

    /// The underlying entry.
    pub fn entry(&self) -> &'a ListEntry {
        self.entry
    }

    /// Whether the view has children right now.
    pub fn has_children(&self) -> bool {
        self.has_children
    }

    /// Host node this row shows.
    pub fn node(&self) -> NodeId {
        self.entry.node
    }

    /// Depth below the inspected root.
    pub fn depth(&self) -> usize {
        self.entry.depth
    }

    /// Whether the row is expanded.
    pub fn is_expanded(&self) -> bool {
        self.entry.expanded
    }

    /// Class name captured at creation.
    pub fn display_name(&self) -> &'a str {
        self.entry.display_name()
    }

    /// Frame captured at creation.
    pub fn frame(&self) -> Rect {
        self.entry.frame()
    }

    /// Hidden flag captured at creation.
    pub fn is_hidden(&self) -> bool {
        self.entry.is_hidden()
    }

    /// Opacity captured at creation.
    pub fn alpha(&self) -> f64 {
        self.entry.alpha()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtree_core::{ViewArena, ViewSpec};

    #[test]
    fn capture_snapshots_attributes() {
        let (mut arena, root) = ViewArena::from_spec(
            ViewSpec::new("UILabel")
                .with_frame(Rect::new(10.0, 30.0, 80.0, 20.0))
                .with_alpha(0.5),
        );
        let entry = ListEntry::capture(&arena, root, 2);
        arena.set_alpha(root, 1.0).unwrap();
        arena.set_hidden(root, true).unwrap();

        assert_eq!(entry.depth(), 2);
        assert!(!entry.is_expanded());
        assert_eq!(entry.display_name(), "UILabel");
        assert_eq!(entry.frame(), Rect::new(10.0, 30.0, 80.0, 20.0));
        assert_eq!(entry.alpha(), 0.5);
        assert!(!entry.is_hidden());
    }

    #[test]
    fn view_reads_children_live() {
        let (mut arena, root) =
            ViewArena::from_spec(ViewSpec::new("UIView").child(ViewSpec::new("UILabel")));
        let entry = ListEntry::capture(&arena, root, 0);
        assert!(EntryView::new(&entry, &arena).has_children());

        arena.remove_children(root).unwrap();
        assert!(!EntryView::new(&entry, &arena).has_children());
    }

    #[test]
    fn view_forwards_captured_fields() {
        let (arena, root) = ViewArena::from_spec(
            ViewSpec::new("UIButton")
                .with_frame(Rect::new(87.5, 712.0, 200.0, 50.0))
                .with_hidden(true)
                .with_alpha(0.25),
        );
        let entry = ListEntry::capture(&arena, root, 3);
        let view = EntryView::new(&entry, &arena);
        assert_eq!(view.node(), root);
        assert_eq!(view.depth(), 3);
        assert!(!view.is_expanded());
        assert_eq!(view.display_name(), "UIButton");
        assert_eq!(view.frame(), Rect::new(87.5, 712.0, 200.0, 50.0));
        assert!(view.is_hidden());
        assert_eq!(view.alpha(), 0.25);
    }
}
