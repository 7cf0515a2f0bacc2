/// SQLite implementation of the snapshot store
///
/// This module provides the concrete SQLite implementation for persisting
/// engine snapshots. Each user occupies one row; the payload is the JSON
/// serialization of that user's EngineSnapshot.

use std::path::PathBuf;

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::snapshot::EngineSnapshot;
use crate::storage::{migrations, SnapshotStore, StorageError};

/// SQLite-backed snapshot store
pub struct SqliteSnapshotStore {
    conn: Connection,
}

impl SqliteSnapshotStore {
    /// Create a new SQLite store at the given path
    ///
    /// Opens the database file and runs any necessary migrations to
    /// ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite snapshot store initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Create an in-memory store (useful for testing)
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        migrations::initialize_database(&conn)?;
        Ok(Self { conn })
    }

    /// Default on-disk database location
    ///
    /// Prefers the platform data directory, falling back to the current
    /// working directory when none is available.
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("habit_engine");
        path.push("snapshots.db");
        path
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    /// Save (insert or replace) a user's snapshot as a JSON payload
    fn save(&self, snapshot: &EngineSnapshot) -> Result<(), StorageError> {
        let payload = serde_json::to_string(snapshot)?;

        self.conn.execute(
            "INSERT OR REPLACE INTO snapshots (user_id, payload, updated_at)
             VALUES (?1, ?2, ?3)",
            params![snapshot.user_id, payload, Utc::now().to_rfc3339()],
        )?;

        tracing::debug!("Saved snapshot for user '{}'", snapshot.user_id);
        Ok(())
    }

    /// Load a user's snapshot, if one exists
    fn load(&self, user_id: &str) -> Result<Option<EngineSnapshot>, StorageError> {
        let result = self.conn.query_row(
            "SELECT payload FROM snapshots WHERE user_id = ?1",
            params![user_id],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(payload) => {
                let snapshot = serde_json::from_str(&payload)?;
                Ok(Some(snapshot))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    /// Delete a user's snapshot; succeeds whether or not one existed
    fn delete(&self, user_id: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM snapshots WHERE user_id = ?1", params![user_id])?;
        tracing::debug!("Deleted snapshot for user '{}'", user_id);
        Ok(())
    }
}
