//! Derived Map Module
//!
//! The bounded, expiring key/value table backing each derived-value kind.

use std::collections::{HashMap, VecDeque};

use crate::cache::{CacheStats, CachedValue};
#[cfg(test)]
use crate::error::CatalogError;
use crate::error::Result;

// == Derived Map ==
/// A single derived-value map: capacity-bounded, expire-after-write.
///
/// Entries are evicted oldest-write-first when the map is at capacity, and
/// dropped on read once their TTL elapses. Both forms of eviction are
/// transparent: callers must tolerate `None` at any time, including right
/// after a `put`, and fall back to the authoritative store.
///
/// Operations return `Result` so that a remote backend can surface
/// `TransientCacheFailure` behind the same signatures; the in-memory table
/// itself cannot fail.
#[derive(Debug)]
pub struct DerivedMap<V> {
    /// Key-value storage
    entries: HashMap<String, CachedValue<V>>,
    /// Keys ordered by last write, oldest at the front
    write_order: VecDeque<String>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL from last write, in seconds
    ttl_secs: u64,
    /// Remaining operations forced to fail, test hook for retry paths
    #[cfg(test)]
    fault_budget: u32,
}

impl<V: Clone> DerivedMap<V> {
    // == Constructor ==
    /// Creates an empty map with the given capacity and TTL.
    pub fn new(capacity: usize, ttl_secs: u64) -> Self {
        Self {
            entries: HashMap::new(),
            write_order: VecDeque::new(),
            stats: CacheStats::new(),
            capacity,
            ttl_secs,
            #[cfg(test)]
            fault_budget: 0,
        }
    }

    // == Get ==
    /// Returns the value for `key`, or `None` when absent or expired.
    ///
    /// Expired entries are removed on the spot and counted as misses.
    pub fn get(&mut self, key: &str) -> Result<Option<V>> {
        self.check_fault()?;

        match self.entries.get(key) {
            Some(cached) if cached.is_expired() => {
                self.entries.remove(key);
                self.write_order.retain(|k| k != key);
                self.stats.record_eviction();
                self.stats.record_miss();
                self.stats.set_total_entries(self.entries.len());
                Ok(None)
            }
            Some(cached) => {
                self.stats.record_hit();
                Ok(Some(cached.value.clone()))
            }
            None => {
                self.stats.record_miss();
                Ok(None)
            }
        }
    }

    // == Put ==
    /// Stores `value` under `key`, resetting its TTL.
    ///
    /// Inserting a new key at capacity evicts the entry with the oldest write.
    pub fn put(&mut self, key: &str, value: V) -> Result<()> {
        self.check_fault()?;

        let is_overwrite = self.entries.contains_key(key);
        if is_overwrite {
            self.write_order.retain(|k| k != key);
        } else if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.write_order.pop_front() {
                self.entries.remove(&oldest);
                self.stats.record_eviction();
            }
        }

        self.entries
            .insert(key.to_string(), CachedValue::new(value, self.ttl_secs));
        self.write_order.push_back(key.to_string());
        self.stats.set_total_entries(self.entries.len());
        Ok(())
    }

    // == Remove ==
    /// Invalidates `key`. Removing an absent key is not an error.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.check_fault()?;

        if self.entries.remove(key).is_some() {
            self.write_order.retain(|k| k != key);
            self.stats.set_total_entries(self.entries.len());
        }
        Ok(())
    }

    // == Snapshot ==
    /// Returns a read-only copy of all live entries.
    ///
    /// Expired entries are swept out first so the copy never contains them.
    pub fn snapshot(&mut self) -> Result<HashMap<String, V>> {
        self.check_fault()?;

        self.drop_expired();
        Ok(self
            .entries
            .iter()
            .map(|(k, cached)| (k.clone(), cached.value.clone()))
            .collect())
    }

    // == Sweep Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn sweep_expired(&mut self) -> usize {
        self.drop_expired()
    }

    fn drop_expired(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, cached)| cached.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.write_order.retain(|k| k != key);
            self.stats.record_eviction();
        }
        self.stats.set_total_entries(self.entries.len());
        expired.len()
    }

    // == Stats ==
    /// Returns current statistics for this map.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Fault Injection ==
    /// Makes the next `n` operations fail with `TransientCacheFailure`.
    #[cfg(test)]
    pub fn inject_transient_failures(&mut self, n: u32) {
        self.fault_budget = n;
    }

    #[cfg(test)]
    fn check_fault(&mut self) -> Result<()> {
        if self.fault_budget > 0 {
            self.fault_budget -= 1;
            return Err(CatalogError::TransientCacheFailure(
                "injected cache backend failure".to_string(),
            ));
        }
        Ok(())
    }

    #[cfg(not(test))]
    fn check_fault(&mut self) -> Result<()> {
        Ok(())
    }
}
