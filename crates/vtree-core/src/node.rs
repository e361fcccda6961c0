#![forbid(unsafe_code)]

//! The read-only capability a host view hierarchy exposes to the inspector.
//!
//! The inspector never holds host view objects. It holds [`NodeId`] handles
//! and asks a [`ViewTree`] registry about them. The registry is borrowed for
//! the whole debugging session, so every handle it minted stays valid until
//! the session ends.

use crate::geometry::Rect;

/// Opaque handle to a view in a host registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a handle from its raw registry index.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw registry index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display attributes of a view, read at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAttributes {
    /// Resolved runtime class name, e.g. `UILabel`.
    pub display_name: String,
    /// Frame in the parent's coordinate space.
    pub frame: Rect,
    /// Whether the host marks the view hidden.
    pub hidden: bool,
    /// Opacity as reported by the host (not clamped).
    pub alpha: f64,
}

/// Read-only access to a host view hierarchy.
///
/// Implementations may panic when handed a [`NodeId`] they did not mint;
/// the inspector only ever passes back handles obtained from the same
/// registry.
pub trait ViewTree {
    /// Direct children in the host's natural order.
    ///
    /// The order must be stable across calls within one debugging session.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Human-readable class name.
    fn display_name(&self, node: NodeId) -> String;

    /// Frame in the parent's coordinate space.
    fn frame(&self, node: NodeId) -> Rect;

    /// Whether the view is hidden.
    fn is_hidden(&self, node: NodeId) -> bool;

    /// View opacity.
    fn alpha(&self, node: NodeId) -> f64;

    /// Whether the view currently has any children.
    fn has_children(&self, node: NodeId) -> bool {
        !self.children(node).is_empty()
    }

    /// Snapshot all display attributes at once.
    fn attributes(&self, node: NodeId) -> NodeAttributes {
        NodeAttributes {
            display_name: self.display_name(node),
            frame: self.frame(node),
            hidden: self.is_hidden(node),
            alpha: self.alpha(node),
        }
    }
}

impl<T: ViewTree + ?Sized> ViewTree for &T {
    fn children(&self, node: NodeId) -> Vec<NodeId> {
        (**self).children(node)
    }

    fn display_name(&self, node: NodeId) -> String {
        (**self).display_name(node)
    }

    fn frame(&self, node: NodeId) -> Rect {
        (**self).frame(node)
    }

    fn is_hidden(&self, node: NodeId) -> bool {
        (**self).is_hidden(node)
    }

    fn alpha(&self, node: NodeId) -> f64 {
        (**self).alpha(node)
    }

    fn has_children(&self, node: NodeId) -> bool {
        (**self).has_children(node)
    }

    fn attributes(&self, node: NodeId) -> NodeAttributes {
        (**self).attributes(node)
    }
}
