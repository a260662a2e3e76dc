// src/report/dispatcher.rs
//! Strategy selection, batch debounce, and failure recovery
//!
//! The request strategy debounces into one delayed flush at a time; a new
//! capture while a window is pending never creates a second timer. The
//! immediate strategies (image, navigator, custom) drain the queue on the
//! spot, oldest first. Every failure path restores the queue's original
//! order and persists the full backlog.

use crate::report::transport::{
    BatchTransport, Beacon, Connectivity, CustomReporter, PixelSink,
};
use crate::storage::queue::ErrorQueue;
use crate::storage::store::QueueStore;
use crate::utils::clock::Clock;
use crate::utils::config::{MonitorConfig, ReportMethod};
use metrics::counter;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Delivery collaborators injected into the dispatcher
pub struct DeliveryStack {
    pub transport: Arc<dyn BatchTransport>,
    pub beacon: Arc<dyn Beacon>,
    pub pixel: Arc<dyn PixelSink>,
    pub connectivity: Arc<dyn Connectivity>,
    pub custom: Option<CustomReporter>,
}

/// Strategy-selected reporting dispatcher
pub struct Dispatcher {
    method: ReportMethod,
    report_url: String,
    batch_size: usize,
    batch_window: Duration,

    queue: Arc<ErrorQueue>,
    store: Arc<dyn QueueStore>,
    clock: Arc<dyn Clock>,
    delivery: DeliveryStack,

    /// At most one delayed flush may be pending
    timer_pending: AtomicBool,
    timer_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Dispatcher {
    /// Create a dispatcher over the shared queue and store
    pub fn new(
        config: &MonitorConfig,
        queue: Arc<ErrorQueue>,
        store: Arc<dyn QueueStore>,
        clock: Arc<dyn Clock>,
        delivery: DeliveryStack,
    ) -> Self {
        Self {
            method: config.report_method,
            report_url: config.report_url.clone(),
            batch_size: config.batch_size,
            batch_window: Duration::from_millis(config.batch_window_ms),
            queue,
            store,
            clock,
            delivery,
            timer_pending: AtomicBool::new(false),
            timer_handle: Mutex::new(None),
        }
    }

    /// Route queued records according to the configured strategy
    pub async fn process_queue(self: Arc<Self>) {
        match self.method {
            ReportMethod::Request => self.schedule_batch(),
            ReportMethod::Image | ReportMethod::Navigator | ReportMethod::Custom => {
                self.immediate_report().await;
            }
        }
    }

    /// Arm the debounce window unless one is already pending
    fn schedule_batch(self: Arc<Self>) {
        if self.timer_pending.swap(true, Ordering::SeqCst) {
            return;
        }

        debug!(window_ms = self.batch_window.as_millis() as u64, "Batch window armed");

        let handle = tokio::spawn({
            let dispatcher = Arc::clone(&self);
            async move {
                tokio::time::sleep(dispatcher.batch_window).await;
                // Reset before reporting: the offline branch must leave no
                // pending timer, so a future capture can arm a fresh window
                dispatcher.timer_pending.store(false, Ordering::SeqCst);
                dispatcher.batch_report().await;
            }
        });
        *self.timer_handle.lock() = Some(handle);
    }

    /// One delayed flush: send up to `batch_size` oldest records in one POST
    pub async fn batch_report(&self) {
        if self.queue.is_empty() || self.report_url.is_empty() {
            return;
        }

        if !self.delivery.connectivity.is_online() {
            // Offline: persist the whole backlog, not just the next slice
            debug!("Offline at batch window, persisting backlog");
            self.persist_snapshot();
            return;
        }

        let batch = self.queue.take_front(self.batch_size);
        if batch.is_empty() {
            return;
        }

        match self.delivery.transport.send(&self.report_url, &batch).await {
            Ok(()) => {
                counter!("faultline_batches_delivered").increment(1);
                counter!("faultline_records_delivered").increment(batch.len() as u64);
                if let Err(e) = self.store.clear() {
                    error!("Failed to clear persisted slot after delivery: {}", e);
                }
            }
            Err(e) => {
                counter!("faultline_batch_failures").increment(1);
                warn!(count = batch.len(), "Batch delivery failed, re-queueing: {}", e);
                self.queue.reinsert_front(batch);
                self.persist_snapshot();
            }
        }
    }

    /// Drain the queue now, one record at a time, oldest first
    async fn immediate_report(&self) {
        loop {
            let Some(record) = self.queue.take_front(1).pop() else {
                break;
            };

            match self.method {
                ReportMethod::Image => {
                    // Missing endpoint is a silent no-op, not a failure
                    if self.report_url.is_empty() {
                        continue;
                    }
                    self.delivery
                        .pixel
                        .fire(&self.report_url, &record, self.clock.now_ms())
                        .await;
                    counter!("faultline_pixels_fired").increment(1);
                }
                ReportMethod::Navigator => {
                    let accepted = self
                        .delivery
                        .beacon
                        .send(&self.report_url, std::slice::from_ref(&record))
                        .await;
                    if !accepted {
                        warn!("Beacon rejected record, re-queueing");
                        self.queue.reinsert_front(vec![record]);
                        self.persist_snapshot();
                        // A rejecting primitive would reject the rest too
                        break;
                    }
                    counter!("faultline_beacons_sent").increment(1);
                }
                ReportMethod::Custom => {
                    if let Some(reporter) = &self.delivery.custom {
                        reporter(std::slice::from_ref(&record));
                    }
                }
                ReportMethod::Request => break,
            }
        }
    }

    /// Exit-time flush: best-effort delivery of the entire remaining queue.
    /// The queue is cleared unconditionally, even on silent delivery failure.
    pub async fn flush_all(&self) {
        let records = self.queue.drain_all();
        if records.is_empty() {
            return;
        }

        debug!(count = records.len(), "Exit flush");

        match self.method {
            // The batched strategy also exits through the beacon: there is
            // no time left for a debounce window
            ReportMethod::Request | ReportMethod::Navigator => {
                let _ = self.delivery.beacon.send(&self.report_url, &records).await;
            }
            ReportMethod::Image => {
                for record in &records {
                    self.delivery
                        .pixel
                        .fire(&self.report_url, record, self.clock.now_ms())
                        .await;
                }
            }
            ReportMethod::Custom => {
                if let Some(reporter) = &self.delivery.custom {
                    reporter(&records);
                }
            }
        }
    }

    /// Merge-append the full current queue into the durable slot
    pub fn persist_snapshot(&self) {
        if let Err(e) = self.store.append(&self.queue.snapshot()) {
            error!("Failed to persist queue snapshot: {}", e);
        }
    }

    /// Cancel a pending batch window, if any
    pub fn stop(&self) {
        if let Some(handle) = self.timer_handle.lock().take() {
            handle.abort();
        }
        self.timer_pending.store(false, Ordering::SeqCst);
    }
}
