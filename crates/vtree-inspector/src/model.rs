#![forbid(unsafe_code)]

//! Expansion list model.
//!
//! [`ExpansionList`] owns the flat, depth-annotated pre-order list shown by
//! the inspector and is its only mutator. Expanding a row splices its direct
//! children in right after it; collapsing a row removes the contiguous run
//! of deeper rows that follows it, which covers nested expansions in one
//! step. Neither operation re-walks the hierarchy.
//!
//! # Invariants
//!
//! 1. Row 0 is the session root at depth 0.
//! 2. `depth[k + 1] <= depth[k] + 1` for every adjacent pair.
//! 3. A collapsed row is never followed by a deeper row.
//! 4. The rows at `depth + 1` inside an expanded row's run are its children
//!    in host order (as of the moment it was expanded).
//!
//! # Example
//!
//! ```
//! use vtree_core::{ViewArena, ViewSpec};
//! use vtree_inspector::model::{ExpansionList, ToggleOutcome};
//!
//! let (arena, root) = ViewArena::from_spec(
//!     ViewSpec::new("R")
//!         .child(ViewSpec::new("A").child(ViewSpec::new("A1")))
//!         .child(ViewSpec::new("B")),
//! );
//! let mut list = ExpansionList::new(&arena, root);
//! assert_eq!(list.toggle(&arena, 0), ToggleOutcome::Expanded { inserted: 2 });
//! assert_eq!(list.toggle(&arena, 1), ToggleOutcome::Expanded { inserted: 1 });
//! assert_eq!(list.count(), 4);
//! assert_eq!(list.toggle(&arena, 0), ToggleOutcome::Collapsed { removed: 3 });
//! assert_eq!(list.count(), 1);
//! ```

use vtree_core::{NodeId, ViewTree};

use crate::entry::{EntryView, ListEntry};
use crate::print::{self, DEFAULT_PRINT_PREFIX, LogSink};
use crate::snapshot;

/// What a toggle did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Row expanded; `inserted` children were spliced in after it.
    Expanded { inserted: usize },
    /// Row collapsed; `removed` descendant rows were dropped.
    Collapsed { removed: usize },
    /// Nothing changed (childless expand with the guard enabled).
    Ignored,
}

impl ToggleOutcome {
    /// Stable name for logs and diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expanded { .. } => "expanded",
            Self::Collapsed { .. } => "collapsed",
            Self::Ignored => "ignored",
        }
    }
}

/// Result of tapping a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivateOutcome {
    /// The row has children and was toggled.
    Toggled(ToggleOutcome),
    /// The row is a leaf; the list is unchanged.
    Selected,
}

/// Checked access errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// `index` is not a current row.
    IndexOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for ListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "row {index} out of range for list of {len} rows")
            }
        }
    }
}

impl std::error::Error for ListError {}

/// A broken list invariant, reported by [`ExpansionList::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Row at which the violation was detected.
    pub index: usize,
    /// What was wrong.
    pub reason: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}", self.index, self.reason)
    }
}

impl std::error::Error for InvariantViolation {}

/// The flat list of visible rows and its expand/collapse logic.
#[derive(Debug, Clone)]
pub struct ExpansionList {
    entries: Vec<ListEntry>,
    guard_childless: bool,
}

impl ExpansionList {
    /// Start a list holding only `root`.
    pub fn new<T: ViewTree + ?Sized>(tree: &T, root: NodeId) -> Self {
        Self {
            entries: snapshot::build(tree, root),
            guard_childless: false,
        }
    }

    /// When enabled, expanding a childless row is ignored instead of
    /// marking it expanded.
    #[must_use]
    pub fn with_childless_guard(mut self, guard: bool) -> Self {
        self.guard_childless = guard;
        self
    }

    /// Number of visible rows.
    #[inline]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// All rows in display order.
    #[inline]
    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    /// Iterate rows in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, ListEntry> {
        self.entries.iter()
    }

    /// Row at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&ListEntry> {
        self.entries.get(index)
    }

    /// Renderer view of the row at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn entry<'a, T: ViewTree + ?Sized>(&'a self, tree: &T, index: usize) -> EntryView<'a> {
        match self.try_entry(tree, index) {
            Ok(view) => view,
            Err(err) => panic!("{err}"),
        }
    }

    /// Checked variant of [`entry`](Self::entry).
    pub fn try_entry<'a, T: ViewTree + ?Sized>(
        &'a self,
        tree: &T,
        index: usize,
    ) -> Result<EntryView<'a>, ListError> {
        let entry = self.entries.get(index).ok_or(self.out_of_range(index))?;
        Ok(EntryView::new(entry, tree))
    }

    /// Number of rows directly after `index` that are deeper than it.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn descendant_run(&self, index: usize) -> usize {
        let depth = self.entries[index].depth();
        self.entries[index + 1..]
            .iter()
            .take_while(|e| e.depth() > depth)
            .count()
    }

    /// Expand or collapse the row at `index`.
    ///
    /// Expanding captures each direct child's attributes at this moment and
    /// inserts them after the row in host order. Collapsing removes every
    /// deeper row that follows, including nested expansions.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn toggle<T: ViewTree + ?Sized>(&mut self, tree: &T, index: usize) -> ToggleOutcome {
        match self.try_toggle(tree, index) {
            Ok(outcome) => outcome,
            Err(err) => panic!("{err}"),
        }
    }

    /// Checked variant of [`toggle`](Self::toggle).
    pub fn try_toggle<T: ViewTree + ?Sized>(
        &mut self,
        tree: &T,
        index: usize,
    ) -> Result<ToggleOutcome, ListError> {
        let entry = self.entries.get(index).ok_or(self.out_of_range(index))?;
        let depth = entry.depth();
        let expanded = entry.is_expanded();

        let _span = tracing::debug_span!(
            "list_toggle",
            index,
            depth,
            action = if expanded { "collapse" } else { "expand" }
        )
        .entered();

        let outcome = if expanded {
            self.collapse(index)
        } else {
            self.expand(tree, index)
        };
        Ok(outcome)
    }

    /// Tap handling: toggle rows that have children, select leaves.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn activate<T: ViewTree + ?Sized>(&mut self, tree: &T, index: usize) -> ActivateOutcome {
        let node = match self.entries.get(index) {
            Some(entry) => entry.node(),
            None => panic!("{}", self.out_of_range(index)),
        };
        if tree.has_children(node) {
            ActivateOutcome::Toggled(self.toggle(tree, index))
        } else {
            ActivateOutcome::Selected
        }
    }

    /// Write the row at `index` to `sink` as one diagnostic line.
    ///
    /// Uses the captured attributes, so the line describes the view as it was
    /// when its row was created.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn print<S: LogSink + ?Sized>(&self, index: usize, sink: &mut S) {
        self.print_with_prefix(index, DEFAULT_PRINT_PREFIX, sink);
    }

    /// [`print`](Self::print) with a custom line prefix.
    pub fn print_with_prefix<S: LogSink + ?Sized>(&self, index: usize, prefix: &str, sink: &mut S) {
        match self.entries.get(index) {
            Some(entry) => sink.emit(&print::format_entry(prefix, entry)),
            None => panic!("{}", self.out_of_range(index)),
        }
    }

    /// Verify the list invariants against the current hierarchy.
    pub fn check_invariants<T: ViewTree + ?Sized>(
        &self,
        tree: &T,
    ) -> Result<(), InvariantViolation> {
        let violation = |index: usize, reason: String| Err(InvariantViolation { index, reason });

        match self.entries.first() {
            None => return violation(0, "list is empty".into()),
            Some(first) if first.depth() != 0 => {
                return violation(0, format!("root depth is {}", first.depth()));
            }
            Some(_) => {}
        }

        for (i, pair) in self.entries.windows(2).enumerate() {
            let (cur, next) = (&pair[0], &pair[1]);
            if next.depth() > cur.depth() + 1 {
                return violation(
                    i + 1,
                    format!("depth jumps from {} to {}", cur.depth(), next.depth()),
                );
            }
            if next.depth() == 0 {
                return violation(i + 1, "second root row".into());
            }
            if !cur.is_expanded() && next.depth() > cur.depth() {
                return violation(i, "collapsed row is followed by a deeper row".into());
            }
        }

        for (i, entry) in self.entries.iter().enumerate() {
            if !entry.is_expanded() {
                continue;
            }
            let run = &self.entries[i + 1..i + 1 + self.descendant_run(i)];
            let shown: Vec<NodeId> = run
                .iter()
                .filter(|e| e.depth() == entry.depth() + 1)
                .map(ListEntry::node)
                .collect();
            if shown != tree.children(entry.node()) {
                return violation(i, "expanded run does not match host children".into());
            }
        }

        Ok(())
    }

    fn expand<T: ViewTree + ?Sized>(&mut self, tree: &T, index: usize) -> ToggleOutcome {
        let parent = &self.entries[index];
        let depth = parent.depth() + 1;
        let children = tree.children(parent.node());

        if children.is_empty() && self.guard_childless {
            tracing::debug!(index, "ignoring expand of childless row");
            return ToggleOutcome::Ignored;
        }

        let inserted = children.len();
        let at = index + 1;
        self.entries.splice(
            at..at,
            children
                .into_iter()
                .map(|child| ListEntry::capture(tree, child, depth)),
        );
        self.entries[index].expanded = true;

        tracing::debug!(index, inserted, "expanded row");
        ToggleOutcome::Expanded { inserted }
    }

    fn collapse(&mut self, index: usize) -> ToggleOutcome {
        let removed = self.descendant_run(index);
        let start = index + 1;
        self.entries.drain(start..start + removed);
        self.entries[index].expanded = false;

        tracing::debug!(index, removed, "collapsed row");
        ToggleOutcome::Collapsed { removed }
    }

    fn out_of_range(&self, index: usize) -> ListError {
        ListError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        }
    }
}

impl<'a> IntoIterator for &'a ExpansionList {
    type Item = &'a ListEntry;
    type IntoIter = std::slice::Iter<'a, ListEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
