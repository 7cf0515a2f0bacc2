/// Append-only session ledger
///
/// This module holds the collection of SessionRecords. Records are only
/// ever appended; corrections enter as new adjustment records, and no
/// operation deletes or compacts history. Display order is recency of
/// insertion, which is not timestamp order, since manual entries may be
/// backdated.

use serde::{Deserialize, Serialize};

use crate::domain::SessionRecord;

/// The append-only record collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionLedger {
    records: Vec<SessionRecord>,
}

impl SessionLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    /// Rebuild a ledger from snapshot data, preserving insertion order
    pub fn from_records(records: Vec<SessionRecord>) -> Self {
        Self { records }
    }

    /// Append a record
    ///
    /// A zero-duration record is silently dropped (no-op, not an error).
    /// Record constructors already refuse zero, so this guard only fires
    /// on hand-built or corrupted input. Returns whether the record was
    /// kept.
    pub fn append(&mut self, record: SessionRecord) -> bool {
        if record.duration_secs == 0 {
            tracing::debug!("Dropped zero-duration record for '{}'", record.habit_name);
            return false;
        }
        tracing::debug!(
            "Appended {:?} record for '{}': {}s",
            record.kind,
            record.habit_name,
            record.duration_secs
        );
        self.records.push(record);
        true
    }

    /// All records whose `occurred_at_ms` falls in `[start, end)`
    ///
    /// Omitted bounds are unbounded. Results are ordered newest insertion
    /// first, for display.
    pub fn query_window(&self, start: Option<i64>, end: Option<i64>) -> Vec<&SessionRecord> {
        self.records
            .iter()
            .rev()
            .filter(|r| start.map_or(true, |s| r.occurred_at_ms >= s))
            .filter(|r| end.map_or(true, |e| r.occurred_at_ms < e))
            .collect()
    }

    /// Signed sum of seconds for one habit name within `[start_ms, end_ms)`
    pub fn seconds_for(&self, habit_name: &str, start_ms: i64, end_ms: i64) -> i64 {
        self.records
            .iter()
            .filter(|r| r.habit_name == habit_name)
            .filter(|r| r.occurred_at_ms >= start_ms && r.occurred_at_ms < end_ms)
            .map(|r| r.duration_secs)
            .sum()
    }

    /// All records in insertion order
    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
