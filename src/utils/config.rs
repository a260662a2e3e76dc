// src/utils/config.rs
//! Monitor configuration
//!
//! Layered loading: built-in defaults, then an optional `faultline.toml`,
//! then `FAULTLINE_*` environment variables.

use crate::utils::errors::{MonitorError, Result};
use serde::{Deserialize, Serialize};

/// Delivery strategy for queued records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMethod {
    /// Batched HTTP POST with a debounce window
    Request,

    /// Pixel GET carrying one record in the query string
    Image,

    /// Best-effort beacon, one record at a time
    Navigator,

    /// User-supplied callback
    Custom,
}

/// Collector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Attach buffered replay events to captured records
    pub record_screen: bool,

    /// Delivery strategy (default: request)
    pub report_method: ReportMethod,

    /// Backend endpoint; required for request/image/navigator
    pub report_url: String,

    /// Suppress records with an already-seen fingerprint
    pub dedupe: bool,

    /// When false, records are persisted instead of reported
    pub can_report: bool,

    /// Debounce window for the request strategy (milliseconds)
    pub batch_window_ms: u64,

    /// Maximum records per network batch
    pub batch_size: usize,

    /// Replay ring buffer capacity
    pub replay_capacity: usize,

    /// Queue bound; oldest records are dropped past this
    pub max_queue_len: usize,

    /// Dedup cache bound; oldest fingerprints are evicted past this
    pub max_cache_len: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            record_screen: false,
            report_method: ReportMethod::Request,
            report_url: String::new(),
            dedupe: true,
            can_report: true,
            batch_window_ms: 3_000,
            batch_size: 10,
            replay_capacity: 200,
            max_queue_len: 1_000,
            max_cache_len: 1_024,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from defaults, optional file, and environment
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&defaults).map_err(|e| {
                MonitorError::Config(format!("Default serialization failed: {}", e))
            })?)
            .add_source(config::File::with_name("faultline").required(false))
            .add_source(config::Environment::with_prefix("FAULTLINE").try_parsing(true))
            .build()
            .map_err(|e| MonitorError::Config(format!("Config build failed: {}", e)))?;

        settings
            .try_deserialize()
            .map_err(|e| MonitorError::Config(format!("Config deserialization failed: {}", e)))
    }

    /// Whether the configured strategy needs a report URL
    pub fn requires_url(&self) -> bool {
        matches!(
            self.report_method,
            ReportMethod::Request | ReportMethod::Image | ReportMethod::Navigator
        )
    }

    /// True when a URL-requiring strategy is missing its endpoint.
    /// This is a silent no-op condition, not a hard failure.
    pub fn url_missing(&self) -> bool {
        self.requires_url() && self.report_url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert!(!config.record_screen);
        assert_eq!(config.report_method, ReportMethod::Request);
        assert!(config.dedupe);
        assert!(config.can_report);
        assert_eq!(config.batch_window_ms, 3_000);
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.replay_capacity, 200);
    }

    #[test]
    fn test_url_missing() {
        let mut config = MonitorConfig::default();
        assert!(config.url_missing());

        config.report_url = "https://errors.example.com/ingest".to_string();
        assert!(!config.url_missing());

        config.report_url.clear();
        config.report_method = ReportMethod::Custom;
        assert!(!config.url_missing());
    }

    #[test]
    fn test_method_serde_names() {
        let json = serde_json::to_string(&ReportMethod::Navigator).unwrap();
        assert_eq!(json, "\"navigator\"");

        let method: ReportMethod = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(method, ReportMethod::Image);
    }
}
