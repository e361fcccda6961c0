#![forbid(unsafe_code)]

//! In-memory view registry.
//!
//! [`ViewArena`] stores a view hierarchy as flat storage addressed by
//! [`NodeId`]. It implements [`ViewTree`], which makes it the reference host
//! for tests, benches, and the harness.
//!
//! # Example
//!
//! ```
//! use vtree_core::{Rect, ViewArena, ViewSpec, ViewTree};
//!
//! let (arena, root) = ViewArena::from_spec(
//!     ViewSpec::new("UIView")
//!         .child(ViewSpec::new("UILabel").with_frame(Rect::new(10.0, 30.0, 80.0, 20.0)))
//!         .child(ViewSpec::new("UIButton")),
//! );
//!
//! assert_eq!(arena.display_name(root), "UIView");
//! assert_eq!(arena.children(root).len(), 2);
//! ```

use crate::error::TreeError;
use crate::geometry::Rect;
use crate::node::{NodeId, ViewTree};

/// Declarative description of a view subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSpec {
    name: String,
    frame: Rect,
    hidden: bool,
    alpha: f64,
    children: Vec<ViewSpec>,
}

impl ViewSpec {
    /// A visible, opaque view with a zero frame.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frame: Rect::ZERO,
            hidden: false,
            alpha: 1.0,
            children: Vec::new(),
        }
    }

    /// Set the frame.
    #[must_use]
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    /// Set the hidden flag.
    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set the opacity.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Append a child subtree.
    #[must_use]
    pub fn child(mut self, child: ViewSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Replace the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<ViewSpec>) -> Self {
        self.children = children;
        self
    }

    /// Class name of this view.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child subtrees.
    #[must_use]
    pub fn children(&self) -> &[ViewSpec] {
        &self.children
    }

    /// Number of views in this subtree, including this one.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        let nested: usize = self.children.iter().map(ViewSpec::subtree_len).sum();
        1 + nested
    }
}

#[derive(Debug, Clone)]
struct ArenaNode {
    name: String,
    frame: Rect,
    hidden: bool,
    alpha: f64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Flat storage for one or more view hierarchies.
///
/// Handles are never reused: detaching a subtree unlinks it from its parent
/// but keeps its storage, so handles held by an open inspector stay valid.
#[derive(Debug, Clone, Default)]
pub struct ViewArena {
    nodes: Vec<ArenaNode>,
}

impl ViewArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an arena holding a single hierarchy; returns it with its root.
    ///
    /// # Panics
    ///
    /// Panics if the spec holds more than `u32::MAX` views.
    #[must_use]
    pub fn from_spec(spec: ViewSpec) -> (Self, NodeId) {
        let mut arena = Self::new();
        let root = arena
            .insert_root(spec)
            .expect("spec exceeds view arena capacity");
        (arena, root)
    }

    /// Insert a detached hierarchy and return its root.
    pub fn insert_root(&mut self, spec: ViewSpec) -> Result<NodeId, TreeError> {
        self.insert(spec, None)
    }

    /// Append `spec` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, spec: ViewSpec) -> Result<NodeId, TreeError> {
        self.check(parent)?;
        let id = self.insert(spec, Some(parent))?;
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    /// Unlink every child of `parent`, returning the detached handles.
    pub fn remove_children(&mut self, parent: NodeId) -> Result<Vec<NodeId>, TreeError> {
        self.check(parent)?;
        let detached = std::mem::take(&mut self.nodes[parent.index()].children);
        for &child in &detached {
            self.nodes[child.index()].parent = None;
        }
        Ok(detached)
    }

    /// Change the hidden flag of a view.
    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) -> Result<(), TreeError> {
        self.node_mut(node)?.hidden = hidden;
        Ok(())
    }

    /// Change the opacity of a view.
    pub fn set_alpha(&mut self, node: NodeId, alpha: f64) -> Result<(), TreeError> {
        self.node_mut(node)?.alpha = alpha;
        Ok(())
    }

    /// Change the frame of a view.
    pub fn set_frame(&mut self, node: NodeId, frame: Rect) -> Result<(), TreeError> {
        self.node_mut(node)?.frame = frame;
        Ok(())
    }

    /// Parent of a view, if it is attached.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.index()).and_then(|n| n.parent)
    }

    /// Whether the handle was minted by this arena.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    /// Total number of views ever inserted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no views.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert(&mut self, spec: ViewSpec, parent: Option<NodeId>) -> Result<NodeId, TreeError> {
        let raw = u32::try_from(self.nodes.len())
            .map_err(|_| TreeError::CapacityExceeded)?;
        let id = NodeId::new(raw);
        let ViewSpec {
            name,
            frame,
            hidden,
            alpha,
            children,
        } = spec;
        self.nodes.push(ArenaNode {
            name,
            frame,
            hidden,
            alpha,
            parent,
            children: Vec::with_capacity(children.len()),
        });
        for child in children {
            let child_id = self.insert(child, Some(id))?;
            self.nodes[id.index()].children.push(child_id);
        }
        Ok(id)
    }

    fn check(&self, node: NodeId) -> Result<(), TreeError> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(TreeError::UnknownNode(node))
        }
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut ArenaNode, TreeError> {
        self.nodes
            .get_mut(node.index())
            .ok_or(TreeError::UnknownNode(node))
    }

    fn node(&self, node: NodeId) -> &ArenaNode {
        match self.nodes.get(node.index()) {
            Some(n) => n,
            None => panic!("view {node} is not registered in this arena"),
        }
    }
}

impl ViewTree for ViewArena {
    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).children.clone()
    }

    fn display_name(&self, node: NodeId) -> String {
        self.node(node).name.clone()
    }

    fn frame(&self, node: NodeId) -> Rect {
        self.node(node).frame
    }

    fn is_hidden(&self, node: NodeId) -> bool {
        self.node(node).hidden
    }

    fn alpha(&self, node: NodeId) -> f64 {
        self.node(node).alpha
    }

    fn has_children(&self, node: NodeId) -> bool {
        !self.node(node).children.is_empty()
    }
}
