// src/utils/mod.rs
//! Common utilities
//!
//! - **config**: Layered monitor configuration
//! - **errors**: Error taxonomy and Result alias
//! - **clock**: Injectable wall-clock abstraction

pub mod clock;
pub mod config;
pub mod errors;

pub use clock::{Clock, SystemClock};
pub use config::{MonitorConfig, ReportMethod};
pub use errors::{MonitorError, Result};
