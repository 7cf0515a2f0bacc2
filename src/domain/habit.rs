/// Habit entity and its timer state machine
///
/// This module defines the core Habit struct that represents a recurring
/// activity the user tracks, along with the per-habit stopwatch/countdown
/// state machine. The machine is caller-driven: it keeps no thread and no
/// clock of its own, the engine delivers one `tick()` per elapsed second.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{streak::advance_streak, EngineError, HabitId, TimerMode};

/// Largest countdown input whose derived second target still fits in u32
///
/// There is no product-level maximum; this bound only keeps
/// `countdown_minutes * 60` from overflowing.
const MAX_COUNTDOWN_MINUTES: u32 = u32::MAX / 60;

/// Result of delivering one second to a habit's timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The habit was not running; nothing changed
    Idle,
    /// The timer advanced one second and keeps running
    Ticking,
    /// A countdown reached its target and reset itself; the engine must
    /// commit a session of exactly this many seconds
    Completed { duration_secs: u32 },
}

/// A habit represents a recurring activity the user times
///
/// Each habit is either `Idle` (not running, elapsed reset to 0) or
/// `Running`. A stopwatch runs until stopped; a countdown completes on its
/// own once elapsed time reaches the configured target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier, assigned at creation, immutable
    pub id: HabitId,
    /// Display name (e.g., "Reading", "Morning Run")
    pub name: String,
    /// Optional free-text label for grouping
    pub category: Option<String>,
    /// Display tag copied onto every session this habit logs
    pub color: String,
    /// Selected timer behavior
    pub mode: TimerMode,
    /// Countdown length input in whole minutes; minimum 1
    pub countdown_minutes: u32,
    /// Elapsed seconds of the in-progress session; 0 while idle
    pub elapsed_secs: u32,
    /// True while a session is actively ticking
    pub running: bool,
    /// Count of distinct calendar days with at least one completed session
    pub streak: u32,
    /// Local calendar date of the most recent streak-advancing session
    pub last_completion: Option<NaiveDate>,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a new idle habit with validation
    pub fn new(
        name: String,
        category: Option<String>,
        color: String,
    ) -> Result<Self, EngineError> {
        Self::validate_name(&name)?;

        Ok(Self {
            id: HabitId::new(),
            name: name.trim().to_string(),
            category,
            color,
            mode: TimerMode::Stopwatch,
            countdown_minutes: 1,
            elapsed_secs: 0,
            running: false,
            streak: 0,
            last_completion: None,
            created_at: Utc::now(),
        })
    }

    /// Effective countdown target in seconds
    ///
    /// Derived from the whole-minute input, so it is always >= 60. The
    /// input cannot change while running, so the target is stable for the
    /// lifetime of a session.
    pub fn target_duration_secs(&self) -> u32 {
        self.countdown_minutes * 60
    }

    /// Begin a session. Only valid from idle.
    ///
    /// Resets elapsed time and marks the habit running. Has no ledger side
    /// effect; committing happens on stop or countdown completion.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.running {
            return Err(EngineError::invalid_transition(format!(
                "Habit '{}' is already running",
                self.name
            )));
        }
        self.elapsed_secs = 0;
        self.running = true;
        Ok(())
    }

    /// Advance the timer by exactly one second
    ///
    /// For a countdown, reaching the target transitions back to idle and
    /// reports the completed duration; elapsed time never exceeds the
    /// target.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        self.elapsed_secs += 1;

        match self.mode {
            TimerMode::Stopwatch => TickOutcome::Ticking,
            TimerMode::Countdown => {
                let target = self.target_duration_secs();
                if self.elapsed_secs >= target {
                    self.running = false;
                    self.elapsed_secs = 0;
                    TickOutcome::Completed { duration_secs: target }
                } else {
                    TickOutcome::Ticking
                }
            }
        }
    }

    /// End the session. Only valid while running.
    ///
    /// Returns the elapsed seconds to commit, or `None` when nothing
    /// elapsed (zero-duration sessions are discarded, not logged).
    pub fn stop(&mut self) -> Result<Option<u32>, EngineError> {
        if !self.running {
            return Err(EngineError::invalid_transition(format!(
                "Habit '{}' is not running",
                self.name
            )));
        }
        let elapsed = self.elapsed_secs;
        self.running = false;
        self.elapsed_secs = 0;
        if elapsed == 0 {
            Ok(None)
        } else {
            Ok(Some(elapsed))
        }
    }

    /// Change timer behavior. Only valid while idle.
    pub fn switch_mode(&mut self, mode: TimerMode) -> Result<(), EngineError> {
        if self.running {
            return Err(EngineError::invalid_transition(format!(
                "Cannot switch mode of '{}' while running",
                self.name
            )));
        }
        self.mode = mode;
        self.elapsed_secs = 0;
        Ok(())
    }

    /// Adjust the whole-minute countdown input by a signed delta
    ///
    /// Only valid while idle and in countdown mode. The result is clamped
    /// to a minimum of 1 minute; the only upper bound is the one that
    /// keeps the derived second target representable.
    pub fn adjust_countdown_input(&mut self, delta: i64) -> Result<(), EngineError> {
        if self.running {
            return Err(EngineError::invalid_transition(format!(
                "Cannot adjust countdown of '{}' while running",
                self.name
            )));
        }
        if self.mode != TimerMode::Countdown {
            return Err(EngineError::invalid_transition(format!(
                "Habit '{}' is not in countdown mode",
                self.name
            )));
        }
        let adjusted = i64::from(self.countdown_minutes).saturating_add(delta);
        self.countdown_minutes = adjusted.clamp(1, i64::from(MAX_COUNTDOWN_MINUTES)) as u32;
        Ok(())
    }

    /// Apply a positive-duration completion on the given local date
    ///
    /// Delegates to the streak rule: same date is a no-op, any new date
    /// advances the streak by one.
    pub fn record_completion(&mut self, date: NaiveDate) {
        let (streak, last) = advance_streak(self.streak, self.last_completion, date);
        self.streak = streak;
        self.last_completion = Some(last);
    }

    // Validation helper methods

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), EngineError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(EngineError::invalid_input("Habit name cannot be empty"));
        }

        if trimmed.len() > 100 {
            return Err(EngineError::invalid_input(
                "Habit name cannot be longer than 100 characters",
            ));
        }

        Ok(())
    }
}
