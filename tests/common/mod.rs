// tests/common/mod.rs
//! Recording fakes for the delivery collaborators

use async_trait::async_trait;
use faultline::report::transport::{BatchTransport, Beacon, Connectivity, PixelSink};
use faultline::utils::errors::{MonitorError, Result};
use faultline::ErrorRecord;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Batch transport that records every batch and can be told to fail
#[derive(Default)]
pub struct RecordingTransport {
    pub fail: AtomicBool,
    pub batches: Mutex<Vec<Vec<ErrorRecord>>>,
}

#[async_trait]
impl BatchTransport for RecordingTransport {
    async fn send(&self, _url: &str, records: &[ErrorRecord]) -> Result<()> {
        self.batches.lock().push(records.to_vec());
        if self.fail.load(Ordering::SeqCst) {
            Err(MonitorError::Report("forced failure".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Beacon that records every call and can be told to reject
#[derive(Default)]
pub struct RecordingBeacon {
    pub reject: AtomicBool,
    pub calls: Mutex<Vec<Vec<ErrorRecord>>>,
}

#[async_trait]
impl Beacon for RecordingBeacon {
    async fn send(&self, _url: &str, records: &[ErrorRecord]) -> bool {
        self.calls.lock().push(records.to_vec());
        !self.reject.load(Ordering::SeqCst)
    }
}

/// Pixel sink that records every fired request
#[derive(Default)]
pub struct RecordingPixel {
    pub fired: Mutex<Vec<(ErrorRecord, u64)>>,
}

#[async_trait]
impl PixelSink for RecordingPixel {
    async fn fire(&self, _url: &str, record: &ErrorRecord, timestamp_ms: u64) {
        self.fired.lock().push((record.clone(), timestamp_ms));
    }
}

/// Connectivity probe with a switchable state
pub struct SwitchableNetwork {
    online: AtomicBool,
}

impl SwitchableNetwork {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

impl Connectivity for SwitchableNetwork {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}
