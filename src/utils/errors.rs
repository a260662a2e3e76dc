// src/utils/errors.rs
//! Error taxonomy for the collector
//!
//! Nothing in this taxonomy is fatal to the hosting process. Capture errors
//! are dropped inside the guarded capture boundary, report errors trigger
//! re-queue + persistence, and persistence errors are logged and discarded.

use thiserror::Error;

/// Collector errors
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Malformed or unexpected event payload on the capture path
    #[error("Capture failed: {0}")]
    Capture(String),

    /// Network failure or beacon rejection; recoverable via re-queue
    #[error("Report failed: {0}")]
    Report(String),

    /// Durable store failure or malformed persisted data
    #[error("Storage failed: {0}")]
    Storage(String),

    /// Invalid or incomplete configuration
    #[error("Configuration invalid: {0}")]
    Config(String),

    /// Record serialization failure
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MonitorError>;
