// src/capture/replay_buffer.rs
//! Bounded buffer of replay events awaiting correlation
//!
//! Holds the most recent recorder events (capacity 200 by default), dropping
//! the oldest on overflow. Draining is consuming: consecutive errors never
//! share a replay segment.

use crossbeam::queue::ArrayQueue;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Drop-oldest ring of opaque recorder events
pub struct ReplayBuffer {
    /// Underlying bounded queue
    ring: Arc<ArrayQueue<serde_json::Value>>,

    /// Push counter
    push_count: Arc<AtomicU64>,

    /// Overflow counter (oldest event displaced)
    displaced_count: Arc<AtomicU64>,
}

impl ReplayBuffer {
    /// Create a new buffer with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: Arc::new(ArrayQueue::new(capacity)),
            push_count: Arc::new(AtomicU64::new(0)),
            displaced_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Push a recorder event, displacing the oldest when full
    pub fn push(&self, event: serde_json::Value) {
        self.push_count.fetch_add(1, Ordering::Relaxed);
        if self.ring.force_push(event).is_some() {
            self.displaced_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Drain the buffer, oldest first, leaving it empty
    pub fn drain(&self) -> Vec<serde_json::Value> {
        let mut events = Vec::with_capacity(self.ring.len());
        while let Some(event) = self.ring.pop() {
            events.push(event);
        }
        events
    }

    /// Current number of buffered events
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Buffer capacity
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Total events displaced by overflow
    pub fn displaced(&self) -> u64 {
        self.displaced_count.load(Ordering::Relaxed)
    }
}
