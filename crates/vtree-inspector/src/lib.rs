#![forbid(unsafe_code)]

//! Expandable view-hierarchy inspector.
//!
//! The inspector flattens a host hierarchy (anything implementing
//! [`ViewTree`](vtree_core::ViewTree)) into a depth-annotated list that
//! starts with only the root row and grows or shrinks as rows are toggled.
//!
//! - [`model::ExpansionList`] is the list and its expand/collapse logic.
//! - [`row`] turns rows into indent, affordance, and label data.
//! - [`session::InspectorSession`] ties a borrowed hierarchy, a list, a
//!   configuration, and optional [`diagnostics`] together.
//! - [`walk`] has eager whole-hierarchy helpers.

pub mod config;
pub mod diagnostics;
pub mod entry;
pub mod model;
pub mod print;
pub mod row;
pub mod session;
pub mod snapshot;
pub mod walk;

pub use config::{ConfigError, InspectorConfig};
pub use diagnostics::{DiagnosticEntry, DiagnosticEventKind, DiagnosticLog};
pub use entry::{EntryView, ListEntry};
pub use model::{ActivateOutcome, ExpansionList, InvariantViolation, ListError, ToggleOutcome};
pub use print::{LogSink, TracingSink, WriterSink};
pub use row::{Affordance, RowPresentation};
pub use session::InspectorSession;
pub use snapshot::build;
pub use walk::{OutlineRegion, absolute_frame, dump_tree, find_by_name, outline_regions};
