// src/observability/mod.rs
//! Tracing setup
//!
//! Structured logging via `tracing`, filterable with `RUST_LOG`
//! (default `faultline=info`).

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("faultline=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
