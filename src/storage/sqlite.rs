// src/storage/sqlite.rs
//! SQLite-backed durable slot
//!
//! A single key-value table stands in for the browser's localStorage slot.
//! Malformed persisted data is logged, discarded, and never escalated; the
//! collector continues with an empty slot.

use crate::capture::record::ErrorRecord;
use crate::storage::store::{QueueStore, QUEUE_KEY};
use crate::utils::errors::{MonitorError, Result};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::{debug, error, info};

/// Durable queue slot stored in SQLite
pub struct SqliteStore {
    db: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the store at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| MonitorError::Storage(format!("Failed to open database: {}", e)))?;

        let store = Self {
            db: Mutex::new(conn),
        };
        store.init_schema()?;

        info!("Queue store initialized at {:?}", path.as_ref());
        Ok(store)
    }

    /// Open an in-memory database. Useful for demos and tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| MonitorError::Storage(format!("Failed to open database: {}", e)))?;

        let store = Self {
            db: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let db = self.db.lock();
        db.execute(
            r#"
            CREATE TABLE IF NOT EXISTS kv_slots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
            [],
        )
        .map_err(|e| MonitorError::Storage(format!("Schema creation failed: {}", e)))?;
        Ok(())
    }

    fn read_slot(&self) -> Result<Option<String>> {
        let db = self.db.lock();
        db.query_row(
            "SELECT value FROM kv_slots WHERE key = ?",
            params![QUEUE_KEY],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| MonitorError::Storage(format!("Slot read failed: {}", e)))
    }

    fn write_slot(&self, value: &str) -> Result<()> {
        let db = self.db.lock();
        db.execute(
            r#"
            INSERT INTO kv_slots (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![QUEUE_KEY, value, chrono::Utc::now().timestamp()],
        )
        .map_err(|e| MonitorError::Storage(format!("Slot write failed: {}", e)))?;
        Ok(())
    }

    /// Current slot contents, tolerating a malformed value
    fn current_records(&self) -> Result<Vec<ErrorRecord>> {
        let Some(raw) = self.read_slot()? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                // Corrupt slot: discard rather than poison every future append
                error!("Discarding malformed persisted queue: {}", e);
                self.clear()?;
                Ok(Vec::new())
            }
        }
    }
}

impl QueueStore for SqliteStore {
    fn load(&self) -> Result<Vec<ErrorRecord>> {
        let records = self.current_records()?;
        debug!(count = records.len(), "Loaded persisted queue");
        Ok(records)
    }

    fn append(&self, records: &[ErrorRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut merged = self.current_records()?;
        merged.extend(records.iter().cloned());

        let json = serde_json::to_string(&merged)?;
        self.write_slot(&json)?;

        debug!(appended = records.len(), total = merged.len(), "Persisted queue slot");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let db = self.db.lock();
        db.execute("DELETE FROM kv_slots WHERE key = ?", params![QUEUE_KEY])
            .map_err(|e| MonitorError::Storage(format!("Slot clear failed: {}", e)))?;
        Ok(())
    }
}
