// src/report/transport.rs
//! Delivery primitives behind injectable traits
//!
//! Every way a record leaves the process lives here: the batched HTTP POST,
//! the one-pixel GET, the best-effort beacon, and the user callback type.
//! The traits exist so tests substitute fakes instead of a live backend.

use crate::capture::record::ErrorRecord;
use crate::utils::errors::{MonitorError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared client for the default transports; reqwest clients pool
/// connections internally, so one per process is enough
static DEFAULT_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// User-supplied delivery callback for the custom strategy
pub type CustomReporter = Arc<dyn Fn(&[ErrorRecord]) + Send + Sync>;

/// Batched delivery: one HTTP POST carrying a JSON array of records
#[async_trait]
pub trait BatchTransport: Send + Sync {
    async fn send(&self, url: &str, records: &[ErrorRecord]) -> Result<()>;
}

/// Best-effort delivery primitive suited to teardown conditions.
/// Returns whether the payload was accepted for delivery.
#[async_trait]
pub trait Beacon: Send + Sync {
    async fn send(&self, url: &str, records: &[ErrorRecord]) -> bool;
}

/// Fire-and-forget pixel: a GET whose query string carries one record
#[async_trait]
pub trait PixelSink: Send + Sync {
    async fn fire(&self, url: &str, record: &ErrorRecord, timestamp_ms: u64);
}

/// Network availability probe, checked before a batch send
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Connectivity probe for environments without an offline signal
#[derive(Debug, Default)]
pub struct AlwaysOnline;

impl Connectivity for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}

/// reqwest-backed batch transport
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT.clone())
    }
}

#[async_trait]
impl BatchTransport for HttpTransport {
    async fn send(&self, url: &str, records: &[ErrorRecord]) -> Result<()> {
        let response = self
            .client
            .post(url)
            .json(records)
            .send()
            .await
            .map_err(|e| MonitorError::Report(format!("Batch request failed: {}", e)))?;

        response
            .error_for_status()
            .map_err(|e| MonitorError::Report(format!("Batch rejected: {}", e)))?;

        debug!(count = records.len(), "Batch delivered");
        Ok(())
    }
}

/// reqwest-backed beacon. A POST whose outcome is reported but never retried
/// here; retry policy belongs to the dispatcher.
pub struct HttpBeacon {
    client: reqwest::Client,
}

impl HttpBeacon {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpBeacon {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT.clone())
    }
}

#[async_trait]
impl Beacon for HttpBeacon {
    async fn send(&self, url: &str, records: &[ErrorRecord]) -> bool {
        if url.is_empty() {
            return false;
        }

        match self.client.post(url).json(records).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Beacon send failed: {}", e);
                false
            }
        }
    }
}

/// reqwest-backed pixel sink. No acknowledgment, no retry.
pub struct HttpPixel {
    client: reqwest::Client,
}

impl HttpPixel {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpPixel {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT.clone())
    }
}

#[async_trait]
impl PixelSink for HttpPixel {
    async fn fire(&self, url: &str, record: &ErrorRecord, timestamp_ms: u64) {
        let data = match serde_json::to_string(record) {
            Ok(data) => data,
            Err(e) => {
                warn!("Pixel payload serialization failed: {}", e);
                return;
            }
        };

        let timestamp = timestamp_ms.to_string();
        let result = self
            .client
            .get(url)
            .query(&[("data", data.as_str()), ("timestamp", timestamp.as_str())])
            .send()
            .await;

        if let Err(e) = result {
            debug!("Pixel fire failed (ignored): {}", e);
        }
    }
}
