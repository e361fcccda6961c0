#![forbid(unsafe_code)]

//! Diagnostic print lines for single rows.
//!
//! Formatting is pure; delivery goes through a [`LogSink`]. Sinks swallow
//! their own failures so printing a row never fails.

use std::io::Write;

use crate::entry::ListEntry;

/// Prefix used to make printed rows easy to grep in a busy log.
pub const DEFAULT_PRINT_PREFIX: &str = "[vtree]";

/// Format the print line for a row.
///
/// ```
/// use vtree_core::{Rect, ViewArena, ViewSpec};
/// use vtree_inspector::entry::ListEntry;
/// use vtree_inspector::print::format_entry;
///
/// let (arena, root) = ViewArena::from_spec(
///     ViewSpec::new("UILabel").with_frame(Rect::new(10.0, 30.0, 80.0, 20.0)),
/// );
/// let entry = ListEntry::capture(&arena, root, 0);
/// assert_eq!(
///     format_entry("[vtree]", &entry),
///     "[vtree] UILabel -- Frame: (10.0, 30.0, 80.0, 20.0) -- Hidden: false, Alpha: 1.0",
/// );
/// ```
pub fn format_entry(prefix: &str, entry: &ListEntry) -> String {
    let body = format!(
        "{} -- Frame: {} -- Hidden: {}, Alpha: {:?}",
        entry.display_name(),
        entry.frame(),
        entry.is_hidden(),
        entry.alpha()
    );
    if prefix.is_empty() {
        body
    } else {
        format!("{prefix} {body}")
    }
}

/// Destination for print lines.
pub trait LogSink {
    /// Deliver one line. Must not panic on delivery failure.
    fn emit(&mut self, line: &str);
}

/// Emits lines as `tracing` events on the `vtree::print` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&mut self, line: &str) {
        tracing::info!(target: "vtree::print", "{line}");
    }
}

/// Writes lines to any [`Write`] implementor, ignoring write errors.
#[derive(Debug)]
pub struct WriterSink<W: Write>(pub W);

impl<W: Write> LogSink for WriterSink<W> {
    fn emit(&mut self, line: &str) {
        let _ = writeln!(self.0, "{line}");
    }
}

/// Collects lines in memory.
impl LogSink for Vec<String> {
    fn emit(&mut self, line: &str) {
        self.push(line.to_owned());
    }
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn emit(&mut self, line: &str) {
        (**self).emit(line);
    }
}
