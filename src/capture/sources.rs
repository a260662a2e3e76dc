// src/capture/sources.rs
//! Raw event payloads from the four error sources
//!
//! Script errors, resource load failures, unhandled promise rejections, and
//! manual boundary reports all funnel through [`normalize`], which stamps a
//! timestamp and claims the buffered replay segment. Malformed payloads
//! normalize to `None` and are dropped silently; the capture path must never
//! surface an error back to the handler that produced the event.

use crate::capture::record::{ErrorKind, ErrorRecord};
use crate::capture::replay_buffer::ReplayBuffer;
use crate::utils::clock::Clock;
use tracing::trace;

/// An unnormalized event from one of the error sources
#[derive(Debug, Clone)]
pub enum RawEvent {
    /// Uncaught script error targeting the global scope
    Script {
        message: String,
        filename: Option<String>,
        lineno: Option<u32>,
        colno: Option<u32>,
    },

    /// Error event targeting a DOM element (failed resource load)
    Resource {
        message: String,
        tag: Option<String>,
        url: Option<String>,
    },

    /// Unhandled promise rejection
    Promise { message: String },

    /// Exception forwarded from a component error boundary
    Manual {
        message: String,
        stack: Option<String>,
        component_stack: Option<String>,
    },
}

impl RawEvent {
    /// Fault classification for this source
    pub fn kind(&self) -> ErrorKind {
        match self {
            RawEvent::Script { .. } => ErrorKind::Js,
            RawEvent::Resource { .. } => ErrorKind::Resource,
            RawEvent::Promise { .. } => ErrorKind::Promise,
            RawEvent::Manual { .. } => ErrorKind::React,
        }
    }
}

/// Normalize a raw event into an `ErrorRecord`
///
/// Returns `None` for payloads with no usable message. When `record_screen`
/// is set the current replay buffer contents are claimed (and the buffer
/// emptied); an empty segment before the recorder produces events is
/// accepted behavior.
pub fn normalize(
    event: RawEvent,
    clock: &dyn Clock,
    record_screen: bool,
    replay: &ReplayBuffer,
) -> Option<ErrorRecord> {
    let mut record = match event {
        RawEvent::Script {
            message,
            filename,
            lineno,
            colno,
        } => {
            if message.trim().is_empty() {
                return None;
            }
            let mut r = ErrorRecord::new(ErrorKind::Js, message);
            r.filename = filename;
            r.lineno = lineno;
            r.colno = colno;
            r
        }
        RawEvent::Resource { message, tag, url } => {
            // A resource failure with neither tag nor url carries nothing to report
            if tag.is_none() && url.is_none() {
                return None;
            }
            let mut r = ErrorRecord::new(ErrorKind::Resource, message);
            r.tag = tag;
            r.url = url;
            r
        }
        RawEvent::Promise { message } => {
            if message.trim().is_empty() {
                return None;
            }
            ErrorRecord::new(ErrorKind::Promise, message)
        }
        RawEvent::Manual {
            message,
            stack,
            component_stack,
        } => {
            if message.trim().is_empty() {
                return None;
            }
            let mut r = ErrorRecord::new(ErrorKind::React, message);
            r.stack = stack;
            r.component_stack = component_stack;
            r
        }
    };

    if record.timestamp.is_none() {
        record.timestamp = Some(clock.now_ms());
    }

    if record_screen {
        record.screen_data = Some(replay.drain());
    }

    trace!(kind = ?record.kind, "Normalized captured event");
    Some(record)
}
