//! Record definitions
//!
//! Defines the stored entity and its expiry rules.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value};

/// A stored value: a JSON object
pub type Document = Map<String, Value>;

/// A single stored key/value pair with its TTL metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Record key, unique within a store
    pub key: String,

    /// The stored document
    pub value: Document,

    /// Seconds of validity from the write (0 = never expires)
    pub ttl_seconds: i64,

    /// Unix timestamp the record is valid until (0 when `ttl_seconds == 0`)
    pub expires_at: i64,
}

impl Record {
    /// Build a record written at `now`
    ///
    /// `expires_at` is always derived here, so every (re)write recomputes it.
    pub fn new(key: impl Into<String>, value: Document, ttl_seconds: i64, now: i64) -> Self {
        let expires_at = if ttl_seconds != 0 {
            now.saturating_add(ttl_seconds)
        } else {
            0
        };

        Self {
            key: key.into(),
            value,
            ttl_seconds,
            expires_at,
        }
    }

    /// Whether the record is expired at `now`
    #[inline]
    pub fn is_expired(&self, now: i64) -> bool {
        self.ttl_seconds != 0 && self.expires_at < now
    }
}

/// Current wall-clock time in Unix seconds
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
