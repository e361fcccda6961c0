#![forbid(unsafe_code)]

//! Inspector sessions.
//!
//! A session is one opening of the overlay: it borrows the host hierarchy
//! for its whole lifetime, owns the expansion list, and records diagnostics
//! when enabled. Closing it consumes it; nothing survives except the
//! diagnostic log handed back by [`InspectorSession::close`].
//!
//! ```
//! use vtree_core::{ViewArena, ViewSpec};
//! use vtree_inspector::{ActivateOutcome, InspectorConfig, InspectorSession};
//!
//! let (arena, root) = ViewArena::from_spec(
//!     ViewSpec::new("UIView").child(ViewSpec::new("UILabel")),
//! );
//! let mut session = InspectorSession::open(&arena, root, InspectorConfig::default());
//! session.tap(0);
//! assert_eq!(session.count(), 2);
//! assert_eq!(session.tap(1), ActivateOutcome::Selected);
//! assert!(session.close().is_none());
//! ```

use std::time::Duration;

use vtree_core::{NodeId, ViewTree};

use crate::config::InspectorConfig;
use crate::diagnostics::{DiagnosticEntry, DiagnosticEventKind, DiagnosticLog};
use crate::entry::EntryView;
use crate::model::{ActivateOutcome, ExpansionList, ListError, ToggleOutcome};
use crate::print::{LogSink, TracingSink};
use crate::row::{self, RowPresentation};

/// One open inspector over a borrowed hierarchy.
pub struct InspectorSession<'t, T: ViewTree + ?Sized> {
    tree: &'t T,
    root: NodeId,
    list: ExpansionList,
    config: InspectorConfig,
    diagnostics: Option<DiagnosticLog>,
}

impl<'t, T: ViewTree + ?Sized> InspectorSession<'t, T> {
    /// Snapshot `root` and start a session.
    ///
    /// A diagnostic log is attached when `config.diagnostics` is set, and
    /// mirrors to stderr when `config.diagnostics_stderr` is also set.
    pub fn open(tree: &'t T, root: NodeId, config: InspectorConfig) -> Self {
        let diagnostics = config.diagnostics.then(|| {
            let log = DiagnosticLog::new();
            if config.diagnostics_stderr {
                log.with_stderr()
            } else {
                log
            }
        });
        Self::open_with_log(tree, root, config, diagnostics)
    }

    /// Start a session recording into `log` regardless of configuration.
    pub fn open_with_diagnostics(
        tree: &'t T,
        root: NodeId,
        config: InspectorConfig,
        log: DiagnosticLog,
    ) -> Self {
        Self::open_with_log(tree, root, config, Some(log))
    }

    fn open_with_log(
        tree: &'t T,
        root: NodeId,
        config: InspectorConfig,
        diagnostics: Option<DiagnosticLog>,
    ) -> Self {
        let list = ExpansionList::new(tree, root)
            .with_childless_guard(config.guard_childless_expand);
        tracing::info!(
            root = root.raw(),
            name = %tree.display_name(root),
            guard_childless = config.guard_childless_expand,
            "inspector session opened"
        );

        let mut session = Self {
            tree,
            root,
            list,
            config,
            diagnostics,
        };
        session.record(|s| {
            DiagnosticEntry::new(DiagnosticEventKind::SessionOpened)
                .with_row(0, 0, s.tree.display_name(s.root))
                .with_row_count(s.list.count())
        });
        session
    }

    /// How long the host should wait before presenting the overlay.
    pub fn open_delay(&self) -> Duration {
        self.config.open_delay
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tree(&self) -> &'t T {
        self.tree
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// The underlying list model.
    pub fn list(&self) -> &ExpansionList {
        &self.list
    }

    /// Number of visible rows.
    pub fn count(&self) -> usize {
        self.list.count()
    }

    /// Renderer view of a row.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn entry(&self, index: usize) -> EntryView<'_> {
        self.list.entry(self.tree, index)
    }

    /// Row tap: toggle rows with children, select leaves.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn tap(&mut self, index: usize) -> ActivateOutcome {
        let outcome = self.list.activate(self.tree, index);
        match outcome {
            ActivateOutcome::Toggled(toggled) => self.record_toggle(index, toggled),
            ActivateOutcome::Selected => self.record_row(DiagnosticEventKind::RowSelected, index),
        }
        outcome
    }

    /// Expand or collapse a row without the has-children check.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn toggle(&mut self, index: usize) -> ToggleOutcome {
        match self.try_toggle(index) {
            Ok(outcome) => outcome,
            Err(err) => panic!("{err}"),
        }
    }

    /// Checked variant of [`toggle`](Self::toggle).
    pub fn try_toggle(&mut self, index: usize) -> Result<ToggleOutcome, ListError> {
        let outcome = self.list.try_toggle(self.tree, index)?;
        self.record_toggle(index, outcome);
        Ok(outcome)
    }

    /// Print a row through `tracing` on the `vtree::print` target.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn print(&mut self, index: usize) {
        self.print_to(index, &mut TracingSink);
    }

    /// Print a row to `sink`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn print_to<S: LogSink + ?Sized>(&mut self, index: usize, sink: &mut S) {
        self.list
            .print_with_prefix(index, &self.config.print_prefix, sink);
        self.record_row(DiagnosticEventKind::RowPrinted, index);
    }

    /// Presentation for every visible row.
    pub fn rows(&self) -> Vec<RowPresentation> {
        row::present_all(&self.list, self.tree, &self.config)
    }

    /// Total list height in points.
    pub fn content_height(&self) -> f64 {
        row::content_height(&self.list, &self.config)
    }

    /// Visible rows as text.
    pub fn render_text(&self) -> String {
        row::render_text(&self.list, self.tree)
    }

    /// The session's diagnostic log, if recording.
    pub fn diagnostics(&self) -> Option<&DiagnosticLog> {
        self.diagnostics.as_ref()
    }

    /// End the session and hand back its diagnostics.
    pub fn close(mut self) -> Option<DiagnosticLog> {
        self.record(|s| {
            DiagnosticEntry::new(DiagnosticEventKind::SessionClosed)
                .with_row_count(s.list.count())
        });
        tracing::info!(
            root = self.root.raw(),
            rows = self.list.count(),
            "inspector session closed"
        );
        self.diagnostics
    }

    fn record_toggle(&mut self, index: usize, outcome: ToggleOutcome) {
        self.record(|s| {
            let (kind, delta) = match outcome {
                ToggleOutcome::Expanded { inserted } => {
                    (DiagnosticEventKind::RowExpanded, Some(inserted))
                }
                ToggleOutcome::Collapsed { removed } => {
                    (DiagnosticEventKind::RowCollapsed, Some(removed))
                }
                ToggleOutcome::Ignored => (DiagnosticEventKind::ExpandIgnored, None),
            };
            let entry = s.row_entry(kind, index);
            match delta {
                Some(delta) => entry.with_delta(delta),
                None => entry,
            }
        });
    }

    fn record_row(&mut self, kind: DiagnosticEventKind, index: usize) {
        self.record(|s| s.row_entry(kind, index));
    }

    fn row_entry(&self, kind: DiagnosticEventKind, index: usize) -> DiagnosticEntry {
        let count = self.list.count();
        let mut entry = DiagnosticEntry::new(kind).with_row_count(count);
        if let Some(row) = self.list.get(index) {
            entry = entry.with_row(index, row.depth(), row.display_name());
        }
        entry
    }

    /// Build and record an entry only when a log is attached.
    fn record(&mut self, build: impl FnOnce(&Self) -> DiagnosticEntry) {
        if self.diagnostics.is_none() {
            return;
        }
        let entry = build(self);
        if let Some(log) = self.diagnostics.as_mut() {
            log.record(entry);
        }
    }
}

impl<T: ViewTree + ?Sized> std::fmt::Debug for InspectorSession<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InspectorSession")
            .field("root", &self.root)
            .field("rows", &self.list.count())
            .field("config", &self.config)
            .field(
                "diagnostics",
                &self.diagnostics.as_ref().map(DiagnosticLog::len),
            )
            .finish()
    }
}
