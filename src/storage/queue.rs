// src/storage/queue.rs
//! Ordered FIFO of records awaiting delivery
//!
//! Insertion order is reporting order. The front holds the oldest unresolved
//! records; a failed batch is reinserted at the front in its original
//! relative order, so retries never reorder across attempts.

use crate::capture::record::ErrorRecord;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tracing::warn;

/// Bounded FIFO queue of pending records
pub struct ErrorQueue {
    inner: Mutex<VecDeque<ErrorRecord>>,
    max_len: usize,
}

impl ErrorQueue {
    /// Create a queue bounded at `max_len` records
    pub fn new(max_len: usize) -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
            max_len: max_len.max(1),
        }
    }

    /// Append a record at the tail, dropping the oldest past the bound
    pub fn push(&self, record: ErrorRecord) {
        let mut queue = self.inner.lock();
        if queue.len() >= self.max_len {
            queue.pop_front();
            warn!(max_len = self.max_len, "Error queue full, dropped oldest record");
        }
        queue.push_back(record);
    }

    /// Append recovered records at the tail, preserving their order
    pub fn extend(&self, records: Vec<ErrorRecord>) {
        for record in records {
            self.push(record);
        }
    }

    /// Remove up to `n` oldest records from the front
    pub fn take_front(&self, n: usize) -> Vec<ErrorRecord> {
        let mut queue = self.inner.lock();
        let n = n.min(queue.len());
        queue.drain(..n).collect()
    }

    /// Remove all records, oldest first
    pub fn drain_all(&self) -> Vec<ErrorRecord> {
        let mut queue = self.inner.lock();
        queue.drain(..).collect()
    }

    /// Restore a failed batch at the front in its original relative order
    pub fn reinsert_front(&self, batch: Vec<ErrorRecord>) {
        let mut queue = self.inner.lock();
        for record in batch.into_iter().rev() {
            queue.push_front(record);
        }
    }

    /// Snapshot of the current queue contents, oldest first
    pub fn snapshot(&self) -> Vec<ErrorRecord> {
        self.inner.lock().iter().cloned().collect()
    }

    /// Drop everything. Used by the exit-time flush.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Current queue length
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
