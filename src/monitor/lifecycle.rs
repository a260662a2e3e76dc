// src/monitor/lifecycle.rs
//! Explicit monitor lifecycle
//!
//! Construction is side-effect free; `start()` recovers the persisted queue
//! and `stop()` cancels the pending batch window. `flush_on_exit()` is the
//! page-hide/unload analog: best-effort delivery of everything left, then an
//! unconditional clear.

use crate::monitor::ErrorMonitor;
use crate::utils::errors::Result;
use std::sync::atomic::Ordering;
use tracing::{info, warn};

impl ErrorMonitor {
    /// Begin collecting: recover previously persisted records into the
    /// (then-empty) queue, oldest first, and clear the durable slot.
    /// Records captured afterwards are appended after the recovered ones.
    pub fn start(&self) -> Result<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            warn!("Monitor already started");
            return Ok(());
        }

        match self.store.load() {
            Ok(recovered) => {
                if !recovered.is_empty() {
                    info!(count = recovered.len(), "Recovered persisted records");
                    self.queue.extend(recovered);
                }
                self.store.clear()?;
            }
            Err(e) => {
                // Malformed or unreadable slot: log and continue empty
                warn!("Failed to recover persisted queue: {}", e);
            }
        }

        info!(method = ?self.config.report_method, "Error monitor started");
        Ok(())
    }

    /// Stop collecting: cancel the pending batch window. Queued records
    /// remain until `flush_on_exit` or a restart recovers them.
    pub fn stop(&self) {
        self.dispatcher.stop();
        self.started.store(false, Ordering::SeqCst);
        info!("Error monitor stopped");
    }

    /// Forced best-effort delivery of the entire remaining queue, performed
    /// at teardown regardless of the configured report timing. The queue is
    /// cleared unconditionally afterwards, even if delivery silently failed;
    /// records persisted by earlier failure paths survive in the store.
    pub async fn flush_on_exit(&self) {
        self.dispatcher.flush_all().await;
    }
}
