// src/capture/dedupe.rs
//! Bounded fingerprint cache suppressing repeat reports
//!
//! Check-and-insert is a single locked operation; the capture path is the
//! only writer. The cache is bounded with FIFO eviction so long-lived
//! sessions cannot grow it without limit.

use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};

/// Fingerprint cache with FIFO eviction
pub struct DedupCache {
    inner: Mutex<CacheState>,
    max_len: usize,
}

struct CacheState {
    seen: HashSet<String>,
    order: VecDeque<String>,
}

impl DedupCache {
    /// Create a cache bounded at `max_len` fingerprints
    pub fn new(max_len: usize) -> Self {
        Self {
            inner: Mutex::new(CacheState {
                seen: HashSet::new(),
                order: VecDeque::new(),
            }),
            max_len: max_len.max(1),
        }
    }

    /// Atomically check a fingerprint and record it.
    /// Returns `false` when the fingerprint was already present.
    pub fn admit(&self, fingerprint: &str) -> bool {
        let mut state = self.inner.lock();

        if state.seen.contains(fingerprint) {
            return false;
        }

        if state.order.len() >= self.max_len {
            if let Some(oldest) = state.order.pop_front() {
                state.seen.remove(&oldest);
            }
        }

        state.seen.insert(fingerprint.to_string());
        state.order.push_back(fingerprint.to_string());
        true
    }

    /// Number of cached fingerprints
    pub fn len(&self) -> usize {
        self.inner.lock().order.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().order.is_empty()
    }
}
