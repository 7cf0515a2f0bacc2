/// Goal progress aggregation
///
/// A pure read-side query over the ledger: filter by habit name and goal
/// window, sum signed seconds (adjustments included, so corrections can
/// lower progress), floor to whole minutes, and cap percent at 1.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::Goal;
use crate::engine::ledger::SessionLedger;

/// Minutes logged against a goal's target within its current window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    /// Whole minutes logged, floor division of the signed second sum
    pub minutes: i64,
    /// The goal's target
    pub target_minutes: u32,
    /// `min(1, minutes / target)`; may be negative if corrections
    /// outweigh sessions
    pub percent: f64,
}

/// Compute progress for one habit's goal at the given instant
///
/// Records are matched by the habit's *current* name; history logged
/// under an old name no longer counts after a rename, by design.
pub fn progress(
    ledger: &SessionLedger,
    habit_name: &str,
    goal: &Goal,
    now: DateTime<Local>,
) -> GoalProgress {
    let (start_ms, end_ms) = goal.window(now);
    let seconds = ledger.seconds_for(habit_name, start_ms, end_ms);
    let minutes = seconds.div_euclid(60);
    let percent = (minutes as f64 / f64::from(goal.target_minutes)).min(1.0);

    GoalProgress {
        minutes,
        target_minutes: goal.target_minutes,
        percent,
    }
}
