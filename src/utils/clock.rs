// src/utils/clock.rs
//! Injectable wall-clock
//!
//! Records are stamped with millisecond timestamps at capture time. The
//! clock is a collaborator so tests can pin time instead of sleeping.

use std::sync::atomic::{AtomicU64, Ordering};

/// Millisecond wall-clock
pub trait Clock: Send + Sync {
    /// Current time in milliseconds since the Unix epoch
    fn now_ms(&self) -> u64;
}

/// System clock backed by chrono
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Manually advanced clock for tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(now_ms),
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}
