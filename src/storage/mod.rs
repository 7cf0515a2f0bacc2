/// Storage layer for persisting engine snapshots
///
/// This module handles saving and loading per-user engine snapshots. The
/// engine itself never touches storage; callers push snapshots through
/// the SnapshotStore trait around mutating commands.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use thiserror::Error;

use crate::snapshot::EngineSnapshot;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the snapshot persistence interface
///
/// This trait allows swapping SQLite for another medium while keeping the
/// same save/load boundary the engine's callers rely on.
pub trait SnapshotStore {
    /// Save (insert or replace) a user's snapshot
    fn save(&self, snapshot: &EngineSnapshot) -> Result<(), StorageError>;

    /// Load a user's snapshot, if one exists
    fn load(&self, user_id: &str) -> Result<Option<EngineSnapshot>, StorageError>;

    /// Delete a user's snapshot; no-op if absent
    fn delete(&self, user_id: &str) -> Result<(), StorageError>;
}
