// src/monitor/mod.rs
//! The wired collector
//!
//! `ErrorMonitor` owns the capture → dedupe → queue → dispatch pipeline and
//! receives every collaborator (clock, store, transports) by injection, so
//! tests substitute fakes instead of ambient globals. Construction has no
//! side effects; listener wiring and persisted-queue recovery happen in
//! [`ErrorMonitor::start`] (see `lifecycle`).

pub mod lifecycle;

use crate::capture::dedupe::DedupCache;
use crate::capture::fingerprint::fingerprint;
use crate::capture::record::ErrorRecord;
use crate::capture::replay_buffer::ReplayBuffer;
use crate::capture::sources::{normalize, RawEvent};
use crate::report::dispatcher::{DeliveryStack, Dispatcher};
use crate::report::transport::{
    AlwaysOnline, BatchTransport, Beacon, Connectivity, CustomReporter, HttpBeacon, HttpPixel,
    HttpTransport, PixelSink,
};
use crate::storage::queue::ErrorQueue;
use crate::storage::store::{MemoryStore, QueueStore};
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::config::MonitorConfig;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{debug, error};

/// Client-side error-telemetry collector
pub struct ErrorMonitor {
    pub(crate) config: MonitorConfig,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) replay: ReplayBuffer,
    pub(crate) cache: DedupCache,
    pub(crate) queue: Arc<ErrorQueue>,
    pub(crate) store: Arc<dyn QueueStore>,
    pub(crate) dispatcher: Arc<Dispatcher>,
    pub(crate) started: AtomicBool,
}

impl ErrorMonitor {
    /// Start building a monitor over the given configuration
    pub fn builder(config: MonitorConfig) -> MonitorBuilder {
        MonitorBuilder::new(config)
    }

    /// Capture one raw event through the guarded boundary.
    ///
    /// Nothing escapes this method: malformed payloads, duplicates, and even
    /// panics on the ingest path are dropped internally, since the caller is
    /// typically a global error handler that must never be re-entered.
    pub async fn capture(&self, raw: RawEvent) {
        let admitted = match panic::catch_unwind(AssertUnwindSafe(|| self.ingest(raw))) {
            Ok(admitted) => admitted,
            Err(_) => {
                error!("Capture path panicked; event dropped");
                false
            }
        };

        if !admitted {
            return;
        }

        if self.config.can_report {
            Arc::clone(&self.dispatcher).process_queue().await;
        } else {
            // Reporting disabled: the durable slot is the only outlet.
            // The in-memory queue stays intact; persistence is a backup.
            self.dispatcher.persist_snapshot();
        }
    }

    /// Normalize, dedupe, and enqueue. Returns whether a record was accepted.
    fn ingest(&self, raw: RawEvent) -> bool {
        let Some(record) = normalize(
            raw,
            self.clock.as_ref(),
            self.config.record_screen,
            &self.replay,
        ) else {
            return false;
        };

        if self.config.dedupe {
            let fp = fingerprint(&record);
            if !self.cache.admit(&fp) {
                debug!(kind = ?record.kind, "Duplicate record suppressed");
                return false;
            }
        }

        self.queue.push(record);
        true
    }

    /// Capture entry point for exceptions caught by a UI error boundary
    pub async fn manual_report(
        &self,
        message: impl Into<String>,
        stack: Option<String>,
        component_stack: Option<String>,
    ) {
        self.capture(RawEvent::Manual {
            message: message.into(),
            stack,
            component_stack,
        })
        .await;
    }

    /// Feed one opaque recorder event into the replay ring buffer
    pub fn push_replay_event(&self, event: serde_json::Value) {
        if self.config.record_screen {
            self.replay.push(event);
        }
    }

    /// Snapshot of the pending queue, oldest first. Read-only.
    pub fn error_queue(&self) -> Vec<ErrorRecord> {
        self.queue.snapshot()
    }

    /// The active configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}

/// Builder wiring collaborators into an [`ErrorMonitor`]
///
/// Unset collaborators default to production implementations: system clock,
/// in-memory store, and reqwest-backed transports sharing one client.
pub struct MonitorBuilder {
    config: MonitorConfig,
    clock: Option<Arc<dyn Clock>>,
    store: Option<Arc<dyn QueueStore>>,
    transport: Option<Arc<dyn BatchTransport>>,
    beacon: Option<Arc<dyn Beacon>>,
    pixel: Option<Arc<dyn PixelSink>>,
    connectivity: Option<Arc<dyn Connectivity>>,
    custom: Option<CustomReporter>,
}

impl MonitorBuilder {
    fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            clock: None,
            store: None,
            transport: None,
            beacon: None,
            pixel: None,
            connectivity: None,
            custom: None,
        }
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn store(mut self, store: Arc<dyn QueueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn BatchTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn beacon(mut self, beacon: Arc<dyn Beacon>) -> Self {
        self.beacon = Some(beacon);
        self
    }

    pub fn pixel(mut self, pixel: Arc<dyn PixelSink>) -> Self {
        self.pixel = Some(pixel);
        self
    }

    pub fn connectivity(mut self, connectivity: Arc<dyn Connectivity>) -> Self {
        self.connectivity = Some(connectivity);
        self
    }

    pub fn custom_reporter(mut self, reporter: CustomReporter) -> Self {
        self.custom = Some(reporter);
        self
    }

    /// Wire everything together. No listeners run until `start()`.
    pub fn build(self) -> ErrorMonitor {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn QueueStore>);

        let delivery = DeliveryStack {
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(HttpTransport::default())),
            beacon: self
                .beacon
                .unwrap_or_else(|| Arc::new(HttpBeacon::default())),
            pixel: self.pixel.unwrap_or_else(|| Arc::new(HttpPixel::default())),
            connectivity: self
                .connectivity
                .unwrap_or_else(|| Arc::new(AlwaysOnline)),
            custom: self.custom,
        };

        let queue = Arc::new(ErrorQueue::new(self.config.max_queue_len));
        let dispatcher = Arc::new(Dispatcher::new(
            &self.config,
            Arc::clone(&queue),
            Arc::clone(&store),
            Arc::clone(&clock),
            delivery,
        ));

        ErrorMonitor {
            replay: ReplayBuffer::new(self.config.replay_capacity),
            cache: DedupCache::new(self.config.max_cache_len),
            queue,
            store,
            dispatcher,
            clock,
            config: self.config,
            started: AtomicBool::new(false),
        }
    }
}
