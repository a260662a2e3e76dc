// src/capture/mod.rs
//! Fault capture and normalization
//!
//! This module turns four independent error sources into one record shape:
//!
//! - **Record**: `ErrorRecord`, the unit of telemetry
//! - **Sources**: Raw event payloads and their normalization
//! - **Replay Buffer**: Bounded drop-oldest buffer of recorder events
//! - **Fingerprint**: Stable identity over a record's stable fields
//! - **Dedupe**: Bounded fingerprint cache suppressing repeats
//!
//! # Architecture
//!
//! ```text
//! script / resource / promise / manual
//!                │
//!          normalize()  ──  stamp timestamp, drain replay buffer
//!                │
//!           fingerprint ──► dedup cache ──► queue
//! ```

pub mod dedupe;
pub mod fingerprint;
pub mod record;
pub mod replay_buffer;
pub mod sources;

// Re-export commonly used types
pub use dedupe::DedupCache;
pub use fingerprint::fingerprint;
pub use record::{ErrorKind, ErrorRecord};
pub use replay_buffer::ReplayBuffer;
pub use sources::RawEvent;
