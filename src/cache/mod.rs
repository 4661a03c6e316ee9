//! Derived-Value Cache Module
//!
//! Process-local, time- and size-bounded storage for the three derived
//! projections of the catalog: per-category minimum price, per-category
//! maximum price, and per-brand running total. The cache is a disposable
//! view; losing any entry only forces a recomputation from the store.

mod entry;
mod map;
mod stats;

#[cfg(test)]
mod property_tests;

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::error::Result;
use crate::store::Product;

// Re-export public types
pub use entry::{current_timestamp_ms, CachedValue};
pub use map::DerivedMap;
pub use stats::CacheStats;

// == Price Entry ==
/// Cache value for the min/max price maps.
///
/// The single value-object representation for both extremes; conversion to
/// domain shapes happens only at the query facade boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceEntry {
    /// Id of the product holding the extreme
    pub product_id: u64,
    /// Brand of that product
    pub brand: String,
    /// Its price
    pub price: i64,
}

impl From<&Product> for PriceEntry {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            brand: product.brand.clone(),
            price: product.price,
        }
    }
}

// == Derived Caches ==
/// The three independent derived-value maps behind their own locks.
///
/// All mutations are single-key puts/removes; no multi-key transaction spans
/// the maps, so a concurrent reader may observe a partially-applied mutation.
/// The store stays authoritative.
#[derive(Debug)]
pub struct DerivedCaches {
    min_price: RwLock<DerivedMap<PriceEntry>>,
    max_price: RwLock<DerivedMap<PriceEntry>>,
    brand_total: RwLock<DerivedMap<i64>>,
}

impl DerivedCaches {
    /// Creates empty caches with the configured TTL and capacities.
    pub fn from_config(config: &Config) -> Self {
        Self::with_settings(
            config.cache_ttl_secs,
            config.price_cache_capacity,
            config.brand_cache_capacity,
        )
    }

    /// Creates empty caches with explicit settings.
    pub fn with_settings(ttl_secs: u64, price_capacity: usize, brand_capacity: usize) -> Self {
        Self {
            min_price: RwLock::new(DerivedMap::new(price_capacity, ttl_secs)),
            max_price: RwLock::new(DerivedMap::new(price_capacity, ttl_secs)),
            brand_total: RwLock::new(DerivedMap::new(brand_capacity, ttl_secs)),
        }
    }

    // == Min Price Map ==
    pub async fn get_min_price(&self, category: &str) -> Result<Option<PriceEntry>> {
        self.min_price.write().await.get(category)
    }

    pub async fn put_min_price(&self, category: &str, entry: PriceEntry) -> Result<()> {
        self.min_price.write().await.put(category, entry)
    }

    pub async fn remove_min_price(&self, category: &str) -> Result<()> {
        self.min_price.write().await.remove(category)
    }

    // == Max Price Map ==
    pub async fn get_max_price(&self, category: &str) -> Result<Option<PriceEntry>> {
        self.max_price.write().await.get(category)
    }

    pub async fn put_max_price(&self, category: &str, entry: PriceEntry) -> Result<()> {
        self.max_price.write().await.put(category, entry)
    }

    pub async fn remove_max_price(&self, category: &str) -> Result<()> {
        self.max_price.write().await.remove(category)
    }

    // == Brand Total Map ==
    pub async fn get_brand_total(&self, brand: &str) -> Result<Option<i64>> {
        self.brand_total.write().await.get(brand)
    }

    pub async fn put_brand_total(&self, brand: &str, total: i64) -> Result<()> {
        self.brand_total.write().await.put(brand, total)
    }

    pub async fn remove_brand_total(&self, brand: &str) -> Result<()> {
        self.brand_total.write().await.remove(brand)
    }

    /// Read-only copy of the whole brand-total map, used for the full-table
    /// aggregation behind the cheapest-brand query.
    pub async fn brand_totals_snapshot(&self) -> Result<HashMap<String, i64>> {
        self.brand_total.write().await.snapshot()
    }

    // == Maintenance ==
    /// Sweeps expired entries out of all three maps, returning the total dropped.
    pub async fn sweep_expired(&self) -> usize {
        let mut removed = self.min_price.write().await.sweep_expired();
        removed += self.max_price.write().await.sweep_expired();
        removed += self.brand_total.write().await.sweep_expired();
        removed
    }

    /// Aggregated statistics across the three maps.
    pub async fn aggregate_stats(&self) -> CacheStats {
        let mut stats = self.min_price.read().await.stats();
        stats.merge(&self.max_price.read().await.stats());
        stats.merge(&self.brand_total.read().await.stats());
        stats
    }

    // == Fault Injection ==
    /// Makes the next `n` min-price operations fail transiently.
    #[cfg(test)]
    pub async fn inject_min_price_faults(&self, n: u32) {
        self.min_price.write().await.inject_transient_failures(n);
    }

    /// Makes the next `n` brand-total operations fail transiently.
    #[cfg(test)]
    pub async fn inject_brand_total_faults(&self, n: u32) {
        self.brand_total.write().await.inject_transient_failures(n);
    }
}
