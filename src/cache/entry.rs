//! Cache Entry Module
//!
//! Wraps a derived value with its expire-after-write deadline.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cached Value ==
/// A derived value stamped with write time and expiry deadline.
///
/// The TTL counts from the last write; every overwrite produces a fresh
/// `CachedValue` and therefore a fresh deadline.
#[derive(Debug, Clone)]
pub struct CachedValue<V> {
    /// The derived value
    pub value: V,
    /// Write timestamp (Unix milliseconds)
    pub written_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl<V> CachedValue<V> {
    /// Creates a new cached value expiring `ttl_secs` after now.
    pub fn new(value: V, ttl_secs: u64) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            written_at: now,
            expires_at: now + ttl_secs * 1000,
        }
    }

    /// Checks whether the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to the expiration time.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
