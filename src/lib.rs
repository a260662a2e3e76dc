// src/lib.rs
//! Faultline client-side error-telemetry collector
//!
//! Captures runtime faults, deduplicates them, queues them, and reports
//! them to a backend, with local persistence as a safety net against
//! delivery failure or process termination.
//!
//! # Architecture
//!
//! The collector is structured into several key modules:
//!
//! - **capture**: Source normalization, replay ring buffer, fingerprinting
//! - **storage**: Pending-record queue and the durable single-slot store
//! - **report**: Delivery transports and the strategy dispatcher
//! - **monitor**: The wired collector with explicit start/stop lifecycle
//! - **replay**: Playable-segment selection for the viewer side
//! - **observability**: Tracing setup
//! - **utils**: Configuration, error taxonomy, clock
//!
//! # Pipeline
//!
//! ```text
//! events → Capture → Dedup → Queue → Dispatcher → network / persistence
//!                                       ▲
//!                 exit-time flush ──────┘
//! ```

// Public module exports
pub mod capture;
pub mod monitor;
pub mod observability;
pub mod replay;
pub mod report;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use capture::{ErrorKind, ErrorRecord, RawEvent};
pub use monitor::{ErrorMonitor, MonitorBuilder};
pub use storage::{QueueStore, SqliteStore};
pub use utils::config::{MonitorConfig, ReportMethod};
pub use utils::errors::{MonitorError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_HASH: &str = env!("GIT_HASH");

/// Collector build information
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub rustc_version: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            git_hash: GIT_HASH,
            build_timestamp: env!("BUILD_TIMESTAMP"),
            rustc_version: env!("RUSTC_VERSION"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_build_info() {
        let info = BuildInfo::current();
        assert!(!info.version.is_empty());
    }
}
