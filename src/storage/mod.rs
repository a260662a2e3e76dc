// src/storage/mod.rs
//! Pending-record queue and durable persistence
//!
//! - **Queue**: Ordered FIFO of records awaiting delivery
//! - **Store**: Single-slot durable store trait + in-memory double
//! - **Sqlite**: SQLite-backed store used in production
//!
//! The durable slot (`"errorQueue"`, a JSON array) is a backup, not a
//! substitute: persisting never clears the in-memory queue. The slot is read
//! once and cleared at monitor start, appended on failure paths, and cleared
//! on a confirmed batch success.

pub mod queue;
pub mod sqlite;
pub mod store;

// Re-export commonly used types
pub use queue::ErrorQueue;
pub use sqlite::SqliteStore;
pub use store::{MemoryStore, QueueStore, QUEUE_KEY};
