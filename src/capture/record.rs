// src/capture/record.rs
//! The unit of telemetry moved through the pipeline

use serde::{Deserialize, Serialize};

/// Classification of a captured fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Uncaught script error
    Js,

    /// Resource load failure (script/link/img)
    Resource,

    /// Unhandled promise rejection
    Promise,

    /// Exception forwarded by a component error boundary
    React,
}

/// One captured fault plus context
///
/// Immutable once enqueued, except for removal and front-reinsertion on
/// delivery failure. Optional fields are omitted from the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Fault classification
    #[serde(rename = "type")]
    pub kind: ErrorKind,

    /// Error message
    pub message: String,

    /// Stack trace, when the source provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,

    /// Component tree location, for boundary-forwarded exceptions
    #[serde(rename = "componentStack", skip_serializing_if = "Option::is_none")]
    pub component_stack: Option<String>,

    /// Script file that raised the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Line within the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineno: Option<u32>,

    /// Column within the line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colno: Option<u32>,

    /// Element tag of a failed resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// src/href of a failed resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Capture time, milliseconds since epoch; stamped when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,

    /// Replay segment claimed from the ring buffer at capture
    #[serde(rename = "screenData", skip_serializing_if = "Option::is_none")]
    pub screen_data: Option<Vec<serde_json::Value>>,
}

impl ErrorRecord {
    /// Create a bare record of the given kind
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            stack: None,
            component_stack: None,
            filename: None,
            lineno: None,
            colno: None,
            tag: None,
            url: None,
            timestamp: None,
            screen_data: None,
        }
    }
}
