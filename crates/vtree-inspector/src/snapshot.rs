#![forbid(unsafe_code)]

//! Initial snapshot of a hierarchy.

use vtree_core::{NodeId, ViewTree};

use crate::entry::ListEntry;

/// Build the initial flat list for `root`.
///
/// Only the root row is produced, collapsed at depth 0. Descendants are
/// discovered one level at a time as rows are expanded, so hierarchies the
/// user never opens are never walked.
pub fn build<T: ViewTree + ?Sized>(tree: &T, root: NodeId) -> Vec<ListEntry> {
    let _span = tracing::debug_span!("snapshot_build", root = root.raw()).entered();
    vec![ListEntry::capture(tree, root, 0)]
}
