// src/report/mod.rs
//! Strategy-selected delivery of queued records
//!
//! - **Transport**: Delivery primitives (HTTP batch, pixel GET, beacon) and
//!   the connectivity probe, all behind injectable traits
//! - **Dispatcher**: Strategy selection, the batch debounce window, and
//!   failure recovery (re-queue + persist)
//!
//! # Architecture
//!
//! ```text
//!                    ┌─ request ──► debounce 3s ──► POST batch (≤10)
//!                    │                 │
//! Queue ── process ──┼─ image ─────► pixel GET per record
//!                    ├─ navigator ──► beacon per record
//!                    └─ custom ─────► callback per record
//!                                      │
//!                       failure ──► reinsert front + persist
//! ```

pub mod dispatcher;
pub mod transport;

// Re-export commonly used types
pub use dispatcher::Dispatcher;
pub use transport::{
    AlwaysOnline, BatchTransport, Beacon, Connectivity, CustomReporter, HttpBeacon, HttpPixel,
    HttpTransport, PixelSink,
};
