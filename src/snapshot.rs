/// Whole-state snapshot of one user's engine
///
/// The engine's entire state (habits, ledger, goals) serializes to this
/// one structure, keyed by an opaque user identifier. The persistence
/// mechanism lives behind the `SnapshotStore` trait; callers save a
/// snapshot around mutating commands and restore it at session start.

use serde::{Deserialize, Serialize};

use crate::domain::{Goal, Habit, SessionRecord};

/// Serializable capture of everything the engine owns for one user
///
/// Habits keep their display order; records keep ledger insertion order;
/// goals are emitted in habit order so equal states produce equal
/// snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Opaque identifier of the user this state belongs to
    pub user_id: String,
    /// All habits, in display order, including live timer state
    pub habits: Vec<Habit>,
    /// The full session ledger, in insertion order
    pub records: Vec<SessionRecord>,
    /// All goals, at most one per habit
    pub goals: Vec<Goal>,
}
