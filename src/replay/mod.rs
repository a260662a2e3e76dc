// src/replay/mod.rs
//! Replay segment selection for the viewer side
//!
//! The viewer treats `screen_data` as a finite sequence of opaque recorder
//! events. Segments shorter than two events cannot be played and are
//! filtered out before being offered.

use crate::capture::record::ErrorRecord;

/// Minimum events for a playable segment
pub const MIN_PLAYABLE_EVENTS: usize = 2;

/// Whether a segment is long enough to play
pub fn is_playable(segment: &[serde_json::Value]) -> bool {
    segment.len() >= MIN_PLAYABLE_EVENTS
}

/// Playable segments from a queue snapshot, in record order
pub fn playable_segments(records: &[ErrorRecord]) -> Vec<&[serde_json::Value]> {
    records
        .iter()
        .filter_map(|record| record.screen_data.as_deref())
        .filter(|segment| is_playable(segment))
        .collect()
}
