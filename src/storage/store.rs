// src/storage/store.rs
//! Durable single-slot store
//!
//! One well-known key maps to a JSON array of records. `append` merges new
//! records after whatever the slot already holds, matching the backup
//! semantics of the persistence paths.

use crate::capture::record::ErrorRecord;
use crate::utils::errors::Result;
use parking_lot::Mutex;

/// Well-known slot key for the persisted queue
pub const QUEUE_KEY: &str = "errorQueue";

/// Durable backing slot for the pending queue
pub trait QueueStore: Send + Sync {
    /// Read the persisted records, oldest first. Malformed data is the
    /// implementation's problem to log and discard.
    fn load(&self) -> Result<Vec<ErrorRecord>>;

    /// Merge-append records after the slot's current contents
    fn append(&self, records: &[ErrorRecord]) -> Result<()>;

    /// Empty the slot
    fn clear(&self) -> Result<()>;
}

/// In-memory store used by tests and no-persistence setups
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Vec<ErrorRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueueStore for MemoryStore {
    fn load(&self) -> Result<Vec<ErrorRecord>> {
        Ok(self.slot.lock().clone())
    }

    fn append(&self, records: &[ErrorRecord]) -> Result<()> {
        self.slot.lock().extend(records.iter().cloned());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.slot.lock().clear();
        Ok(())
    }
}
