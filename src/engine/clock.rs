/// Wall-clock source abstraction
///
/// The engine never reads the system clock directly: timestamps come from
/// a `Clock` the caller supplies, and the 1-second heartbeat is delivered
/// externally via `Engine::tick()`. Production uses `SystemClock`; tests
/// pin time with `FixedClock`.

use chrono::{DateTime, Local};

/// Supplies the current wall-clock time in the local timezone
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at a fixed instant, settable between assertions
///
/// Useful for deterministic window and timestamp tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: std::cell::Cell<DateTime<Local>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self { now: std::cell::Cell::new(now) }
    }

    /// Move the frozen instant
    pub fn set(&self, now: DateTime<Local>) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.now.get()
    }
}
