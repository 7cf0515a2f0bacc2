/// SessionRecord entity for the append-only ledger
///
/// This module defines the SessionRecord struct, one immutable unit of
/// logged time. Records reference habits by name, not id: history is a
/// denormalized copy taken at logging time and survives habit deletion.

use serde::{Deserialize, Serialize};

use crate::domain::{EngineError, RecordId, SessionKind};

/// One immutable ledger entry
///
/// A positive duration adds time; a negative duration is a correction and
/// only the `Adjustment` kind may carry one. A zero duration is never
/// representable - construction rejects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique identifier, independent of insertion position
    pub id: RecordId,
    /// Name of the habit at the time of logging
    pub habit_name: String,
    /// Signed seconds; positive adds time, negative corrects it
    pub duration_secs: i64,
    /// How this record entered the ledger
    pub kind: SessionKind,
    /// Epoch milliseconds: the logging instant, or local midnight of a
    /// backdated manual entry
    pub occurred_at_ms: i64,
    /// Display tag carried for aggregation grouping only
    pub color: String,
}

impl SessionRecord {
    /// Record a completed timer session (stopwatch stop or countdown
    /// auto-commit)
    pub fn completed(
        habit_name: String,
        duration_secs: u32,
        kind: SessionKind,
        occurred_at_ms: i64,
        color: String,
    ) -> Result<Self, EngineError> {
        if duration_secs == 0 {
            return Err(EngineError::invalid_input(
                "Session duration must be greater than zero",
            ));
        }
        Ok(Self {
            id: RecordId::new(),
            habit_name,
            duration_secs: i64::from(duration_secs),
            kind,
            occurred_at_ms,
            color,
        })
    }

    /// Record a manually entered session of whole minutes, anchored at a
    /// caller-supplied instant (local midnight of the logged date)
    pub fn manual(
        habit_name: String,
        minutes: u32,
        occurred_at_ms: i64,
        color: String,
    ) -> Result<Self, EngineError> {
        if minutes == 0 {
            return Err(EngineError::invalid_input(
                "Logged minutes must be greater than zero",
            ));
        }
        Ok(Self {
            id: RecordId::new(),
            habit_name,
            duration_secs: i64::from(minutes) * 60,
            kind: SessionKind::Manual,
            occurred_at_ms,
            color,
        })
    }

    /// Record a signed correction of whole minutes at the current instant
    ///
    /// `positive = false` negates the duration; this is how "undo" is
    /// modeled, since ledger history is never mutated or deleted.
    pub fn adjustment(
        habit_name: String,
        minutes: u32,
        positive: bool,
        occurred_at_ms: i64,
        color: String,
    ) -> Result<Self, EngineError> {
        if minutes == 0 {
            return Err(EngineError::invalid_input(
                "Adjustment minutes must be greater than zero",
            ));
        }
        let magnitude = i64::from(minutes) * 60;
        Ok(Self {
            id: RecordId::new(),
            habit_name,
            duration_secs: if positive { magnitude } else { -magnitude },
            kind: SessionKind::Adjustment,
            occurred_at_ms,
            color,
        })
    }

    /// Whether this record counts as a completion for streak purposes
    ///
    /// Adjustments never advance streaks, regardless of sign.
    pub fn is_completion(&self) -> bool {
        self.kind != SessionKind::Adjustment && self.duration_secs > 0
    }
}
