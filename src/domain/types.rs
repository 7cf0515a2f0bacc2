/// Core types and enums used throughout the domain layer
///
/// This module defines the fundamental types like TimerMode, SessionKind,
/// GoalPeriod, and ID types used by Habit, SessionRecord, and Goal, plus
/// the local-calendar helpers shared by the ledger and the aggregator.

use chrono::{LocalResult, Local, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::EngineError;

/// Unique identifier for a habit
///
/// This is a wrapper around UUID to provide type safety - you can't
/// accidentally pass a habit ID where a record ID is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a habit ID from a string (useful when rehydrating snapshots)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Convert to string representation
    pub fn to_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a session record
///
/// Similar to HabitId but for individual ledger entries. Record IDs carry
/// no ordering: display order comes from insertion position in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Generate a new random record ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a record ID from a string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Convert to string representation
    pub fn to_string(&self) -> String {
        self.0.to_string()
    }
}

/// Timer behavior selected per habit
///
/// A stopwatch counts up until stopped; a countdown runs toward a fixed
/// target and completes on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Stopwatch,
    Countdown,
}

impl TimerMode {
    /// Get the display name for this mode
    pub fn display_name(&self) -> &'static str {
        match self {
            TimerMode::Stopwatch => "stopwatch",
            TimerMode::Countdown => "countdown",
        }
    }
}

/// How a session record entered the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Logged by stopping a running stopwatch
    Stopwatch,
    /// Auto-committed by a countdown reaching its target
    Countdown,
    /// Entered by hand, possibly backdated
    Manual,
    /// A signed correction; the only kind allowed a negative duration
    Adjustment,
}

impl From<TimerMode> for SessionKind {
    fn from(mode: TimerMode) -> Self {
        match mode {
            TimerMode::Stopwatch => SessionKind::Stopwatch,
            TimerMode::Countdown => SessionKind::Countdown,
        }
    }
}

/// The window a goal's target applies to
///
/// Weekly and monthly are rolling millisecond windows ending at the query
/// instant, not calendar-aligned periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

/// Parse a `YYYY-MM-DD` calendar date from caller input
pub fn parse_date(s: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        EngineError::invalid_input(format!("Malformed date (expected YYYY-MM-DD): {}", s))
    })
}

/// Epoch milliseconds of local midnight on the given calendar date
///
/// Backdated manual entries and custom goal windows are anchored here, so
/// both sides of every window comparison live in the same local frame.
pub fn local_midnight_ms(date: NaiveDate) -> i64 {
    let naive = date.and_time(NaiveTime::MIN);
    match naive.and_local_timezone(Local) {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
        // Midnight erased by a DST jump: interpret as UTC rather than fail.
        LocalResult::None => Local.from_utc_datetime(&naive).timestamp_millis(),
    }
}
