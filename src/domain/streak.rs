/// Streak advancement rule
///
/// A streak counts distinct local calendar days that saw at least one
/// positive-duration session. It is not a consecutive-day counter: a new
/// completion date advances the streak by one whether the previous date
/// was yesterday or a month ago, and missed days never reset it. This
/// matches the product's definition of "total days with a session" and
/// must not be tightened to a gap-resetting rule.

use chrono::NaiveDate;

/// Advance a habit's streak with one positive-duration completion
///
/// Returns the new streak value and the new last-completion date. A
/// second completion on the date already recorded changes nothing; any
/// other date increments the streak by exactly one.
pub fn advance_streak(
    current: u32,
    last_completion: Option<NaiveDate>,
    completion_date: NaiveDate,
) -> (u32, NaiveDate) {
    match last_completion {
        Some(last) if last == completion_date => (current, last),
        _ => (current + 1, completion_date),
    }
}
