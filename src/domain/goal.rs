/// Goal entity bound to a single habit
///
/// This module defines the Goal struct (a minutes-per-period target) and
/// the computation of the half-open millisecond window each period maps
/// to. Weekly and monthly are rolling windows ending at the query instant,
/// deliberately not calendar-aligned.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{local_midnight_ms, EngineError, GoalPeriod, HabitId};

const DAY_MS: i64 = 86_400_000;

/// A minutes target for one habit over a period window
///
/// At most one goal exists per habit; setting a new one replaces any
/// existing goal (upsert keyed by habit id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// The habit this goal targets
    pub habit_id: HabitId,
    /// Positive minutes target
    pub target_minutes: u32,
    /// Which window the target applies to
    pub period: GoalPeriod,
    /// First day of a custom window (inclusive); ignored otherwise
    pub start_date: Option<NaiveDate>,
    /// Last day of a custom window (inclusive of its full day); ignored
    /// otherwise
    pub end_date: Option<NaiveDate>,
}

impl Goal {
    /// Create a goal with validation
    ///
    /// A non-positive target is rejected here, never handled at query
    /// time. Custom goals require an ordered start/end date pair.
    pub fn new(
        habit_id: HabitId,
        target_minutes: u32,
        period: GoalPeriod,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, EngineError> {
        if target_minutes == 0 {
            return Err(EngineError::invalid_input(
                "Goal target must be greater than zero minutes",
            ));
        }

        let (start_date, end_date) = match period {
            GoalPeriod::Custom => {
                let (start, end) = match (start_date, end_date) {
                    (Some(start), Some(end)) => (start, end),
                    _ => {
                        return Err(EngineError::invalid_input(
                            "Custom goals require both a start and an end date",
                        ));
                    }
                };
                if end < start {
                    return Err(EngineError::invalid_input(
                        "Custom goal end date cannot precede its start date",
                    ));
                }
                (Some(start), Some(end))
            }
            // Recurring periods ignore any supplied dates.
            _ => (None, None),
        };

        Ok(Self {
            habit_id,
            target_minutes,
            period,
            start_date,
            end_date,
        })
    }

    /// The half-open `[start_ms, end_ms)` window this goal covers at `now`
    ///
    /// - daily: local midnight of `now` through `now`
    /// - weekly: rolling 7 * 24h ending at `now`
    /// - monthly: rolling 30 * 24h ending at `now`
    /// - custom: start date 00:00 local through end date 00:00 local + 24h
    pub fn window(&self, now: DateTime<Local>) -> (i64, i64) {
        let now_ms = now.timestamp_millis();
        match self.period {
            GoalPeriod::Daily => (local_midnight_ms(now.date_naive()), now_ms + 1),
            GoalPeriod::Weekly => (now_ms - 7 * DAY_MS, now_ms + 1),
            GoalPeriod::Monthly => (now_ms - 30 * DAY_MS, now_ms + 1),
            GoalPeriod::Custom => {
                // Validated at construction; a custom goal always carries
                // both dates.
                let start = self.start_date.map(local_midnight_ms).unwrap_or(i64::MIN);
                let end = self
                    .end_date
                    .map(|d| local_midnight_ms(d) + DAY_MS)
                    .unwrap_or(i64::MAX);
                (start, end)
            }
        }
    }
}
