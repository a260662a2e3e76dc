// src/capture/fingerprint.rs
//! Stable identity over a record's stable fields
//!
//! The fingerprint is a SHA-256 hex digest of a canonical serialization of
//! {message, stack, lineno, colno, filename}. Canonical here means the field
//! order is fixed by a dedicated struct, never by construction order.

use crate::capture::record::ErrorRecord;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// The subset of fields that define a record's identity.
/// Field order is load-bearing: serde serializes in declaration order.
#[derive(Serialize)]
struct FingerprintFields<'a> {
    message: &'a str,
    stack: Option<&'a str>,
    lineno: Option<u32>,
    colno: Option<u32>,
    filename: Option<&'a str>,
}

/// Compute the fingerprint of a record as a hex string
pub fn fingerprint(record: &ErrorRecord) -> String {
    let fields = FingerprintFields {
        message: &record.message,
        stack: record.stack.as_deref(),
        lineno: record.lineno,
        colno: record.colno,
        filename: record.filename.as_deref(),
    };

    // Serialization of a fixed-shape struct cannot fail
    let canonical = serde_json::to_vec(&fields).unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::record::ErrorKind;

    fn record(message: &str, filename: &str, lineno: u32, colno: u32) -> ErrorRecord {
        let mut r = ErrorRecord::new(ErrorKind::Js, message);
        r.filename = Some(filename.to_string());
        r.lineno = Some(lineno);
        r.colno = Some(colno);
        r
    }

    #[test]
    fn test_same_fields_same_fingerprint() {
        let a = record("boom", "app.js", 10, 3);
        let mut b = record("boom", "app.js", 10, 3);
        // Volatile fields don't participate
        b.timestamp = Some(999);
        b.screen_data = Some(vec![serde_json::json!({})]);

        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_each_stable_field_matters() {
        let base = record("boom", "app.js", 10, 3);

        let mut other = base.clone();
        other.message = "bang".to_string();
        assert_ne!(fingerprint(&base), fingerprint(&other));

        let mut other = base.clone();
        other.lineno = Some(11);
        assert_ne!(fingerprint(&base), fingerprint(&other));

        let mut other = base.clone();
        other.colno = Some(4);
        assert_ne!(fingerprint(&base), fingerprint(&other));

        let mut other = base.clone();
        other.filename = Some("other.js".to_string());
        assert_ne!(fingerprint(&base), fingerprint(&other));

        let mut other = base.clone();
        other.stack = Some("at main (app.js:10:3)".to_string());
        assert_ne!(fingerprint(&base), fingerprint(&other));
    }

    #[test]
    fn test_fingerprint_is_valid_hex() {
        let fp = fingerprint(&record("boom", "app.js", 1, 1));
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_kind_not_part_of_identity() {
        let js = record("boom", "app.js", 10, 3);
        let mut react = js.clone();
        react.kind = ErrorKind::React;
        assert_eq!(fingerprint(&js), fingerprint(&react));
    }
}
