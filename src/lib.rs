/// Public library interface for the habit session and progress engine
///
/// The engine is a library consumed by a presentation layer (which drives
/// the 1-second heartbeat and renders state) and a persistence layer
/// (which saves and restores per-user snapshots). Nothing here blocks or
/// suspends; every command runs to completion on the caller's thread.

// Internal modules
mod domain;
mod engine;
mod snapshot;
mod storage;

// Re-export public modules and types
pub use domain::*;
pub use engine::{Clock, Engine, FixedClock, GoalProgress, SessionLedger, SystemClock};
pub use snapshot::EngineSnapshot;
pub use storage::{SnapshotStore, SqliteSnapshotStore, StorageError};
