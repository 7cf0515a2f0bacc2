/// The session and progress engine
///
/// This module wires the habit registry, the session ledger, the streak
/// rule, and the goal aggregator behind one command/query surface. A
/// single external heartbeat drives `tick()`; all commands are synchronous
/// and run to completion, so a failing command never leaves partial state.

pub mod clock;
pub mod ledger;
pub mod progress;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ledger::SessionLedger;
pub use progress::GoalProgress;

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{
    local_midnight_ms, parse_date, EngineError, Goal, GoalPeriod, Habit, HabitId, RecordId,
    SessionKind, SessionRecord, TickOutcome, TimerMode,
};
use crate::snapshot::EngineSnapshot;

/// Per-user engine holding all tracked habits, the ledger, and goals
///
/// The engine is stateless between sessions except for one loaded user
/// snapshot: callers restore it with `from_snapshot` at session start and
/// persist `to_snapshot` around mutating commands.
pub struct Engine<C: Clock = SystemClock> {
    user_id: String,
    habits: Vec<Habit>,
    ledger: SessionLedger,
    goals: HashMap<HabitId, Goal>,
    suppressed: bool,
    clock: C,
}

impl Engine<SystemClock> {
    /// Create an empty engine for a user, on the system clock
    pub fn new(user_id: impl Into<String>) -> Self {
        Self::with_clock(user_id, SystemClock)
    }

    /// Restore an engine from a snapshot, on the system clock
    pub fn from_snapshot(snapshot: EngineSnapshot) -> Self {
        Self::from_snapshot_with_clock(snapshot, SystemClock)
    }
}

impl<C: Clock> Engine<C> {
    /// Create an empty engine with an explicit clock source
    pub fn with_clock(user_id: impl Into<String>, clock: C) -> Self {
        Self {
            user_id: user_id.into(),
            habits: Vec::new(),
            ledger: SessionLedger::new(),
            goals: HashMap::new(),
            suppressed: false,
            clock,
        }
    }

    /// Restore an engine from a snapshot with an explicit clock source
    ///
    /// Suppression is transient interaction state and always restores to
    /// false.
    pub fn from_snapshot_with_clock(snapshot: EngineSnapshot, clock: C) -> Self {
        let goals = snapshot
            .goals
            .into_iter()
            .map(|g| (g.habit_id.clone(), g))
            .collect();
        Self {
            user_id: snapshot.user_id,
            habits: snapshot.habits,
            ledger: SessionLedger::from_records(snapshot.records),
            goals,
            suppressed: false,
            clock,
        }
    }

    /// Capture the engine's entire state for persistence
    pub fn to_snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            user_id: self.user_id.clone(),
            habits: self.habits.clone(),
            records: self.ledger.records().to_vec(),
            // Keyed storage has no stable order; emit goals in habit
            // display order so snapshots compare equal.
            goals: self
                .habits
                .iter()
                .filter_map(|h| self.goals.get(&h.id).cloned())
                .collect(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Create a new habit and return its id
    pub fn create_habit(
        &mut self,
        name: impl Into<String>,
        category: Option<String>,
        color: impl Into<String>,
    ) -> Result<HabitId, EngineError> {
        let habit = Habit::new(name.into(), category, color.into())?;
        let id = habit.id.clone();
        tracing::info!("Created habit '{}' ({})", habit.name, id.to_string());
        self.habits.push(habit);
        Ok(id)
    }

    /// Delete a habit, cascading to its goal
    ///
    /// A running timer is cancelled hard: in-flight elapsed time is
    /// discarded without a ledger entry. Past records are untouched, the
    /// ledger outlives the habit.
    pub fn delete_habit(&mut self, id: &HabitId) -> Result<(), EngineError> {
        let idx = self.index_of(id)?;
        let habit = self.habits.remove(idx);
        self.goals.remove(id);
        tracing::info!("Deleted habit '{}' ({})", habit.name, id.to_string());
        Ok(())
    }

    /// Start a habit's timer. Only valid from idle.
    pub fn start(&mut self, id: &HabitId) -> Result<(), EngineError> {
        let idx = self.index_of(id)?;
        self.habits[idx].start()?;
        tracing::debug!("Started '{}'", self.habits[idx].name);
        Ok(())
    }

    /// Stop a habit's timer, committing the elapsed session
    ///
    /// Returns the appended record, or `None` when nothing had elapsed
    /// (a zero-duration session is discarded silently).
    pub fn stop(&mut self, id: &HabitId) -> Result<Option<SessionRecord>, EngineError> {
        let idx = self.index_of(id)?;
        let elapsed = match self.habits[idx].stop()? {
            Some(elapsed) => elapsed,
            None => return Ok(None),
        };

        let now = self.clock.now();
        let habit = &self.habits[idx];
        let record = SessionRecord::completed(
            habit.name.clone(),
            elapsed,
            SessionKind::from(habit.mode),
            now.timestamp_millis(),
            habit.color.clone(),
        )?;
        self.ledger.append(record.clone());
        self.habits[idx].record_completion(now.date_naive());
        tracing::debug!("Stopped '{}' after {}s", self.habits[idx].name, elapsed);
        Ok(Some(record))
    }

    /// Deliver one heartbeat second to every running habit, as one batch
    ///
    /// While suppressed this is a complete no-op; the second is lost, not
    /// queued. Countdowns that reach their target auto-commit a session
    /// and the committed records are returned.
    pub fn tick(&mut self) -> Vec<SessionRecord> {
        if self.suppressed {
            return Vec::new();
        }

        let now = self.clock.now();
        let mut completed = Vec::new();

        for idx in 0..self.habits.len() {
            match self.habits[idx].tick() {
                TickOutcome::Idle | TickOutcome::Ticking => {}
                TickOutcome::Completed { duration_secs } => {
                    // The habit already reset itself; the completion must
                    // be committed unconditionally. duration_secs is a
                    // countdown target, always >= 60, so construction
                    // cannot reject it.
                    debug_assert!(duration_secs >= 60);
                    let habit = &self.habits[idx];
                    let record = SessionRecord {
                        id: RecordId::new(),
                        habit_name: habit.name.clone(),
                        duration_secs: i64::from(duration_secs),
                        kind: SessionKind::Countdown,
                        occurred_at_ms: now.timestamp_millis(),
                        color: habit.color.clone(),
                    };
                    self.ledger.append(record.clone());
                    self.habits[idx].record_completion(now.date_naive());
                    tracing::debug!(
                        "Countdown '{}' completed: {}s",
                        self.habits[idx].name,
                        duration_secs
                    );
                    completed.push(record);
                }
            }
        }

        completed
    }

    /// Suppress or resume the heartbeat, e.g. while a drag is in progress
    ///
    /// Suppressed ticks are dropped entirely; time elapsed while
    /// suppressed is never counted.
    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    /// Change a habit's timer mode. Only valid while idle.
    pub fn switch_mode(&mut self, id: &HabitId, mode: TimerMode) -> Result<(), EngineError> {
        let idx = self.index_of(id)?;
        self.habits[idx].switch_mode(mode)
    }

    /// Adjust a habit's countdown input by a signed number of minutes
    ///
    /// Only valid while idle and in countdown mode; clamped to 1 minute.
    pub fn adjust_countdown_input(
        &mut self,
        id: &HabitId,
        delta: i64,
    ) -> Result<(), EngineError> {
        let idx = self.index_of(id)?;
        self.habits[idx].adjust_countdown_input(delta)
    }

    /// Log a backdated manual session for a habit
    ///
    /// The record is stamped at local midnight of the given `YYYY-MM-DD`
    /// date, independent of the current time, and advances the streak.
    pub fn manual_log(
        &mut self,
        id: &HabitId,
        minutes: u32,
        date: &str,
    ) -> Result<SessionRecord, EngineError> {
        let idx = self.index_of(id)?;
        let date = parse_date(date)?;

        let habit = &self.habits[idx];
        let record = SessionRecord::manual(
            habit.name.clone(),
            minutes,
            local_midnight_ms(date),
            habit.color.clone(),
        )?;
        self.ledger.append(record.clone());
        self.habits[idx].record_completion(date);
        tracing::debug!("Manually logged {}min for '{}' on {}", minutes, self.habits[idx].name, date);
        Ok(record)
    }

    /// Append a signed correction to the ledger at the current instant
    ///
    /// Keyed by habit name, not id: corrections can target history whose
    /// habit no longer exists. Never affects any streak.
    pub fn adjust_ledger(
        &mut self,
        habit_name: &str,
        minutes: u32,
        positive: bool,
        color: impl Into<String>,
    ) -> Result<SessionRecord, EngineError> {
        let name = habit_name.trim();
        if name.is_empty() {
            return Err(EngineError::invalid_input("Habit name cannot be empty"));
        }

        let record = SessionRecord::adjustment(
            name.to_string(),
            minutes,
            positive,
            self.clock.now().timestamp_millis(),
            color.into(),
        )?;
        self.ledger.append(record.clone());
        Ok(record)
    }

    /// Set or replace the goal for a habit (upsert by habit id)
    pub fn set_goal(
        &mut self,
        habit_id: &HabitId,
        target_minutes: u32,
        period: GoalPeriod,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Goal, EngineError> {
        self.index_of(habit_id)?;
        let goal = Goal::new(habit_id.clone(), target_minutes, period, start_date, end_date)?;
        tracing::info!(
            "Set {:?} goal of {}min for habit {}",
            period,
            target_minutes,
            habit_id.to_string()
        );
        self.goals.insert(habit_id.clone(), goal.clone());
        Ok(goal)
    }

    /// Remove the goal for a habit
    pub fn remove_goal(&mut self, habit_id: &HabitId) -> Result<(), EngineError> {
        self.goals
            .remove(habit_id)
            .map(|_| ())
            .ok_or_else(|| EngineError::NotFound(format!("No goal for habit {}", habit_id.to_string())))
    }

    /// Reorder habits for display
    ///
    /// The new order must be a permutation of the current id set; position
    /// carries no meaning beyond display.
    pub fn reorder(&mut self, new_order: &[HabitId]) -> Result<(), EngineError> {
        if new_order.len() != self.habits.len() {
            return Err(EngineError::invalid_input(
                "Reorder must list every habit exactly once",
            ));
        }

        let mut reordered = Vec::with_capacity(self.habits.len());
        for id in new_order {
            match self.habits.iter().find(|h| &h.id == id) {
                Some(habit) => reordered.push(habit.clone()),
                None => return Err(EngineError::NotFound(id.to_string())),
            }
        }

        let mut seen: Vec<&HabitId> = Vec::with_capacity(new_order.len());
        for id in new_order {
            if seen.contains(&id) {
                return Err(EngineError::invalid_input(
                    "Reorder must list every habit exactly once",
                ));
            }
            seen.push(id);
        }

        self.habits = reordered;
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// All habits in display order
    pub fn list_habits(&self) -> &[Habit] {
        &self.habits
    }

    /// One habit by id
    pub fn habit(&self, id: &HabitId) -> Result<&Habit, EngineError> {
        let idx = self.index_of(id)?;
        Ok(&self.habits[idx])
    }

    /// Ledger records with `occurred_at_ms` in `[start, end)`, newest
    /// insertion first
    pub fn query_history(&self, start: Option<i64>, end: Option<i64>) -> Vec<&SessionRecord> {
        self.ledger.query_window(start, end)
    }

    /// Current streak for a habit
    pub fn streak(&self, id: &HabitId) -> Result<u32, EngineError> {
        Ok(self.habit(id)?.streak)
    }

    /// The goal set for a habit, if any
    pub fn goal(&self, habit_id: &HabitId) -> Option<&Goal> {
        self.goals.get(habit_id)
    }

    /// Progress against a habit's goal at the current instant
    pub fn goal_progress(&self, habit_id: &HabitId) -> Result<GoalProgress, EngineError> {
        let habit = self.habit(habit_id)?;
        let goal = self.goals.get(habit_id).ok_or_else(|| {
            EngineError::NotFound(format!("No goal for habit {}", habit_id.to_string()))
        })?;
        Ok(progress::progress(&self.ledger, &habit.name, goal, self.clock.now()))
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// The clock driving timestamps (useful for testing)
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn index_of(&self, id: &HabitId) -> Result<usize, EngineError> {
        self.habits
            .iter()
            .position(|h| &h.id == id)
            .ok_or_else(|| EngineError::NotFound(format!("Habit {}", id.to_string())))
    }
}
