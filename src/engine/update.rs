//! Aggregate Update Engine
//!
//! Decides, for each committed mutation, how the cached category extremes and
//! brand totals change. The three updates are applied in a fixed order (min,
//! then max, then brand total) but become independently visible; the cache is
//! best-effort and the store remains authoritative.

use std::sync::Arc;

use crate::cache::{DerivedCaches, PriceEntry};
use crate::error::{CatalogError, Result};
use crate::store::Product;

// == Aggregate Update Engine ==
#[derive(Debug, Clone)]
pub struct AggregateUpdateEngine {
    caches: Arc<DerivedCaches>,
}

impl AggregateUpdateEngine {
    pub fn new(caches: Arc<DerivedCaches>) -> Self {
        Self { caches }
    }

    // == Create ==
    /// A new product competes for both extremes of its category, then its
    /// price is added to the brand total (absent total reads as zero).
    pub async fn product_created(&self, product: &Product) -> Result<()> {
        self.refresh_min(product).await?;
        self.refresh_max(product).await?;

        let total = self
            .caches
            .get_brand_total(&product.brand)
            .await?
            .unwrap_or(0);
        self.caches
            .put_brand_total(&product.brand, total + product.price)
            .await?;
        Ok(())
    }

    // == Update ==
    /// The new price competes against whatever is currently cached, exactly
    /// as on create. The opposite extreme is not re-derived here; a stale
    /// entry is corrected by the next cache-miss fallback.
    ///
    /// Brand totals are warmed at product creation, so an absent total on
    /// update is a hard `BrandCacheMissing` error rather than a silent
    /// recomputation.
    pub async fn product_updated(&self, old: &Product, new: &Product) -> Result<()> {
        self.refresh_min(new).await?;
        self.refresh_max(new).await?;

        let total = self
            .caches
            .get_brand_total(&new.brand)
            .await?
            .ok_or_else(|| CatalogError::BrandCacheMissing(new.brand.clone()))?;
        self.caches
            .put_brand_total(&new.brand, total - old.price + new.price)
            .await?;
        Ok(())
    }

    // == Delete ==
    /// Extremes pointing at the deleted product are removed outright; the
    /// successor is found by the next query's store fallback. The brand total
    /// drops by the deleted price and disappears entirely at zero or below.
    pub async fn product_deleted(&self, product: &Product) -> Result<()> {
        if let Some(min) = self.caches.get_min_price(&product.category).await? {
            if min.product_id == product.id {
                self.caches.remove_min_price(&product.category).await?;
            }
        }
        if let Some(max) = self.caches.get_max_price(&product.category).await? {
            if max.product_id == product.id {
                self.caches.remove_max_price(&product.category).await?;
            }
        }

        let total = self
            .caches
            .get_brand_total(&product.brand)
            .await?
            .unwrap_or(0);
        let remaining = total - product.price;
        if remaining <= 0 {
            self.caches.remove_brand_total(&product.brand).await?;
        } else {
            self.caches
                .put_brand_total(&product.brand, remaining)
                .await?;
        }
        Ok(())
    }

    // == Extreme Refresh ==
    async fn refresh_min(&self, product: &Product) -> Result<()> {
        let current = self.caches.get_min_price(&product.category).await?;
        if min_replaces(current.as_ref(), product) {
            self.caches
                .put_min_price(&product.category, PriceEntry::from(product))
                .await?;
        }
        Ok(())
    }

    async fn refresh_max(&self, product: &Product) -> Result<()> {
        let current = self.caches.get_max_price(&product.category).await?;
        if max_replaces(current.as_ref(), product) {
            self.caches
                .put_max_price(&product.category, PriceEntry::from(product))
                .await?;
        }
        Ok(())
    }
}

// == Replacement Rules ==
/// The candidate takes the min slot when the slot is empty, already points at
/// the candidate itself, or loses on (price, brand) with ties broken toward
/// the lexicographically lesser brand name.
fn min_replaces(current: Option<&PriceEntry>, candidate: &Product) -> bool {
    match current {
        None => true,
        Some(entry) => {
            entry.product_id == candidate.id
                || candidate.price < entry.price
                || (candidate.price == entry.price && candidate.brand < entry.brand)
        }
    }
}

/// Max mirror of `min_replaces`: ties break toward the lexicographically
/// greater brand name.
fn max_replaces(current: Option<&PriceEntry>, candidate: &Product) -> bool {
    match current {
        None => true,
        Some(entry) => {
            entry.product_id == candidate.id
                || candidate.price > entry.price
                || (candidate.price == entry.price && candidate.brand > entry.brand)
        }
    }
}
