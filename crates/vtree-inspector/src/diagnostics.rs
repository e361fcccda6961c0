#![forbid(unsafe_code)]

//! Session diagnostics as JSONL.
//!
//! Each inspector action can be recorded as a [`DiagnosticEntry`] with a
//! per-log sequence number and an FNV-1a checksum over its payload, so two
//! runs of the same scripted session can be compared line by line.
//!
//! Enable for a session with `VTREE_DIAGNOSTICS=1`. Set
//! `VTREE_DIAGNOSTICS_DETERMINISTIC=1` to replace wall-clock timestamps with
//! `seq * 1000`.

use std::io::Write;
use std::time::Instant;

use serde::{Serialize, Serializer};

/// Default bound on retained entries.
pub const DEFAULT_MAX_ENTRIES: usize = 5000;

/// Check if deterministic timestamps are requested.
pub fn is_deterministic_mode() -> bool {
    std::env::var("VTREE_DIAGNOSTICS_DETERMINISTIC")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Diagnostic event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// Session opened on a root view.
    SessionOpened,
    /// Row expanded.
    RowExpanded,
    /// Row collapsed.
    RowCollapsed,
    /// Expand of a childless row was ignored.
    ExpandIgnored,
    /// Leaf row tapped.
    RowSelected,
    /// Row printed to the log.
    RowPrinted,
    /// Session closed.
    SessionClosed,
}

impl DiagnosticEventKind {
    /// Get the JSONL event type string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SessionOpened => "session_opened",
            Self::RowExpanded => "row_expanded",
            Self::RowCollapsed => "row_collapsed",
            Self::ExpandIgnored => "expand_ignored",
            Self::RowSelected => "row_selected",
            Self::RowPrinted => "row_printed",
            Self::SessionClosed => "session_closed",
        }
    }
}

/// One diagnostic record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticEntry {
    /// Monotonic sequence number within the log.
    pub seq: u64,
    /// Microseconds since the log was created.
    #[serde(rename = "ts_us")]
    pub timestamp_us: u64,
    /// Event kind.
    pub kind: DiagnosticEventKind,
    /// Row index the event applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Depth of that row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    /// Class name of the row's view.
    #[serde(rename = "view", skip_serializing_if = "Option::is_none")]
    pub view_name: Option<String>,
    /// Rows inserted or removed.
    #[serde(rename = "delta", skip_serializing_if = "Option::is_none")]
    pub row_delta: Option<usize>,
    /// Visible rows after the event.
    #[serde(rename = "rows", skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    /// FNV-1a over the payload fields.
    #[serde(serialize_with = "hex_checksum")]
    pub checksum: u64,
}

fn hex_checksum<S: Serializer>(checksum: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{checksum:016x}"))
}

impl DiagnosticEntry {
    /// Create an entry with no payload. `seq` and the timestamp are assigned
    /// by [`DiagnosticLog::record`].
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            seq: 0,
            timestamp_us: 0,
            kind,
            index: None,
            depth: None,
            view_name: None,
            row_delta: None,
            row_count: None,
            checksum: 0,
        }
    }

    /// Set the row this event applies to.
    #[must_use]
    pub fn with_row(mut self, index: usize, depth: usize, name: impl Into<String>) -> Self {
        self.index = Some(index);
        self.depth = Some(depth);
        self.view_name = Some(name.into());
        self
    }

    /// Set the number of rows inserted or removed.
    #[must_use]
    pub fn with_delta(mut self, delta: usize) -> Self {
        self.row_delta = Some(delta);
        self
    }

    /// Set the row count after the event.
    #[must_use]
    pub fn with_row_count(mut self, count: usize) -> Self {
        self.row_count = Some(count);
        self
    }

    /// Compute and set checksum.
    #[must_use]
    pub fn with_checksum(mut self) -> Self {
        self.checksum = self.compute_checksum();
        self
    }

    /// FNV-1a over kind and payload. `seq` and the timestamp are excluded so
    /// identical sessions produce identical checksums.
    fn compute_checksum(&self) -> u64 {
        let payload = format!(
            "{:?}{:?}{:?}{:?}{:?}{:?}",
            self.kind,
            self.index,
            self.depth,
            self.view_name.as_deref().unwrap_or(""),
            self.row_delta,
            self.row_count
        );
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for &b in payload.as_bytes() {
            hash ^= u64::from(b);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        hash
    }

    /// Format as one JSON line.
    pub fn to_jsonl(&self) -> String {
        // Only plain data and a string-keyed struct: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Bounded collector of diagnostic entries.
#[derive(Debug)]
pub struct DiagnosticLog {
    entries: Vec<DiagnosticEntry>,
    max_entries: usize,
    write_stderr: bool,
    deterministic: bool,
    next_seq: u64,
    started: Instant,
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_entries: DEFAULT_MAX_ENTRIES,
            write_stderr: false,
            deterministic: is_deterministic_mode(),
            next_seq: 0,
            started: Instant::now(),
        }
    }

    /// Also write each entry to stderr as it is recorded.
    #[must_use]
    pub fn with_stderr(mut self) -> Self {
        self.write_stderr = true;
        self
    }

    /// Whether entries are mirrored to stderr.
    pub fn mirrors_stderr(&self) -> bool {
        self.write_stderr
    }

    /// Set maximum entries to keep; `0` keeps everything.
    #[must_use]
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// Use `seq * 1000` as the timestamp.
    #[must_use]
    pub fn with_deterministic(mut self, deterministic: bool) -> Self {
        self.deterministic = deterministic;
        self
    }

    /// Stamp and store an entry, evicting the oldest when full.
    pub fn record(&mut self, mut entry: DiagnosticEntry) {
        entry.seq = self.next_seq;
        self.next_seq += 1;
        entry.timestamp_us = if self.deterministic {
            entry.seq.saturating_mul(1_000)
        } else {
            self.started.elapsed().as_micros() as u64
        };
        entry.checksum = entry.compute_checksum();

        if self.write_stderr {
            let _ = writeln!(std::io::stderr(), "{}", entry.to_jsonl());
        }
        if self.max_entries > 0 && self.entries.len() >= self.max_entries {
            self.entries.remove(0);
        }
        self.entries.push(entry);
    }

    /// All retained entries, oldest first.
    pub fn entries(&self) -> &[DiagnosticEntry] {
        &self.entries
    }

    /// Entries of a specific kind.
    pub fn entries_of_kind(&self, kind: DiagnosticEventKind) -> Vec<&DiagnosticEntry> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries. Sequence numbers keep counting.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Export all entries, one JSON object per line.
    pub fn to_jsonl(&self) -> String {
        self.entries
            .iter()
            .map(DiagnosticEntry::to_jsonl)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expanded(index: usize) -> DiagnosticEntry {
        DiagnosticEntry::new(DiagnosticEventKind::RowExpanded)
            .with_row(index, 1, "UIView")
            .with_delta(2)
            .with_row_count(4)
    }

    #[test]
    fn kind_strings_match_serde() {
        for kind in [
            DiagnosticEventKind::SessionOpened,
            DiagnosticEventKind::RowExpanded,
            DiagnosticEventKind::RowCollapsed,
            DiagnosticEventKind::ExpandIgnored,
            DiagnosticEventKind::RowSelected,
            DiagnosticEventKind::RowPrinted,
            DiagnosticEventKind::SessionClosed,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn record_assigns_sequence() {
        let mut log = DiagnosticLog::new().with_deterministic(true);
        log.record(expanded(0));
        log.record(expanded(1));
        let seqs: Vec<u64> = log.entries().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, [0, 1]);
        assert_eq!(log.entries()[1].timestamp_us, 1_000);
    }

    #[test]
    fn checksum_ignores_sequence() {
        let mut a = DiagnosticLog::new().with_deterministic(true);
        let mut b = DiagnosticLog::new().with_deterministic(true);
        a.record(expanded(3));
        b.record(DiagnosticEntry::new(DiagnosticEventKind::SessionOpened));
        b.record(expanded(3));
        assert_eq!(a.entries()[0].checksum, b.entries()[1].checksum);
        assert_ne!(a.entries()[0].checksum, 0);
        let other = expanded(4).with_checksum();
        assert_ne!(a.entries()[0].checksum, other.checksum);
    }

    #[test]
    fn jsonl_skips_absent_fields() {
        let mut log = DiagnosticLog::new().with_deterministic(true);
        let closed = DiagnosticEntry::new(DiagnosticEventKind::SessionClosed);
        log.record(closed.with_row_count(1));
        let line = log.entries()[0].to_jsonl();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["kind"], "session_closed");
        assert_eq!(value["rows"], 1);
        assert_eq!(value["ts_us"], 0);
        assert!(value.get("index").is_none());
        assert!(value.get("view").is_none());
        assert_eq!(value["checksum"].as_str().unwrap().len(), 16);
    }

    #[test]
    fn jsonl_escapes_names() {
        let entry = DiagnosticEntry::new(DiagnosticEventKind::RowPrinted)
            .with_row(0, 0, "My\"View\\")
            .with_checksum();
        let value: serde_json::Value = serde_json::from_str(&entry.to_jsonl()).unwrap();
        assert_eq!(value["view"], "My\"View\\");
    }

    #[test]
    fn bounded_log_evicts_oldest() {
        let mut log = DiagnosticLog::new().with_max_entries(2);
        for i in 0..3 {
            log.record(expanded(i));
        }
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].index, Some(1));
        assert_eq!(log.entries()[1].seq, 2);
    }

    #[test]
    fn filter_and_export() {
        let mut log = DiagnosticLog::new();
        log.record(DiagnosticEntry::new(DiagnosticEventKind::SessionOpened));
        log.record(expanded(0));
        log.record(expanded(1));
        let expanded_rows = log.entries_of_kind(DiagnosticEventKind::RowExpanded);
        assert_eq!(expanded_rows.len(), 2);
        assert_eq!(log.to_jsonl().lines().count(), 3);

        log.clear();
        assert!(log.is_empty());
        log.record(expanded(0));
        assert_eq!(log.entries()[0].seq, 3);
    }

    #[test]
    fn stderr_mirroring_is_opt_in() {
        assert!(!DiagnosticLog::new().mirrors_stderr());
        let mut log = DiagnosticLog::new().with_deterministic(true).with_stderr();
        assert!(log.mirrors_stderr());
        log.record(expanded(0));
        assert_eq!(log.len(), 1);
    }
}
