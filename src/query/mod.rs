//! Query Facade Module
//!
//! Answers the three derived queries cache-first, falling back to the store
//! on miss and repopulating the cache transparently. Only plain value
//! aggregates cross this boundary; cache-internal types stay inside.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::{DerivedCaches, PriceEntry};
use crate::error::{CatalogError, Result};
use crate::store::CatalogStore;

// == Result Aggregates ==
/// One row of the per-category minimum report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinPriceRow {
    pub category: String,
    pub brand: String,
    pub price: i64,
}

/// The per-category minimum report plus the sum of all rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinPriceReport {
    pub rows: Vec<MinPriceRow>,
    pub total: i64,
}

/// Per-category price of the winning brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPrice {
    pub category: String,
    pub price: i64,
}

/// The single brand whose full combination is cheapest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandCombination {
    pub brand: String,
    pub category_prices: Vec<CategoryPrice>,
    pub total: i64,
}

/// Cheapest and most expensive product of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryExtremes {
    pub category: String,
    pub min_brand: String,
    pub min_price: i64,
    pub max_brand: String,
    pub max_price: i64,
}

// == Query Facade ==
#[derive(Debug, Clone)]
pub struct QueryFacade {
    store: Arc<RwLock<CatalogStore>>,
    caches: Arc<DerivedCaches>,
}

impl QueryFacade {
    pub fn new(store: Arc<RwLock<CatalogStore>>, caches: Arc<DerivedCaches>) -> Self {
        Self { store, caches }
    }

    // == Min Price By Category ==
    /// The cheapest known product for every category, cache-first, plus the
    /// sum of the returned prices. Categories without products are skipped.
    pub async fn min_price_by_category(&self) -> Result<MinPriceReport> {
        let categories = self.store.read().await.find_all_categories();

        let mut rows = Vec::with_capacity(categories.len());
        for category in categories {
            if let Some(entry) = self.caches.get_min_price(&category).await? {
                rows.push(MinPriceRow {
                    category,
                    brand: entry.brand,
                    price: entry.price,
                });
                continue;
            }

            let cheapest = match self.store.read().await.find_cheapest_in_category(&category) {
                Ok(product) => product,
                Err(CatalogError::NotFound(_)) => continue,
                Err(err) => return Err(err),
            };
            self.caches
                .put_min_price(&category, PriceEntry::from(&cheapest))
                .await?;
            rows.push(MinPriceRow {
                category,
                brand: cheapest.brand,
                price: cheapest.price,
            });
        }

        let total = rows.iter().map(|row| row.price).sum();
        Ok(MinPriceReport { rows, total })
    }

    // == Cheapest Brand Combination ==
    /// The brand with the lowest total price across its products. A fully
    /// empty brand-total cache is bulk-loaded from the store in one pass
    /// first; ties go to the lexicographically smaller brand name. The
    /// winner's product list is read from the store, not the cache.
    pub async fn cheapest_brand_combination(&self) -> Result<BrandCombination> {
        let mut totals = self.caches.brand_totals_snapshot().await?;

        if totals.is_empty() {
            let sums = self.store.read().await.sum_price_per_brand();
            for sum in &sums {
                self.caches.put_brand_total(&sum.brand, sum.total).await?;
            }
            totals = sums.into_iter().map(|s| (s.brand, s.total)).collect();
        }

        let mut winner: Option<(String, i64)> = None;
        for (brand, total) in totals {
            winner = match winner {
                None => Some((brand, total)),
                Some((best_brand, best_total)) => {
                    if total < best_total || (total == best_total && brand < best_brand) {
                        Some((brand, total))
                    } else {
                        Some((best_brand, best_total))
                    }
                }
            };
        }
        let (brand, total) = winner
            .ok_or_else(|| CatalogError::NotFound("no products in catalog".to_string()))?;

        let category_prices = self
            .store
            .read()
            .await
            .find_products_by_brand(&brand)
            .into_iter()
            .map(|p| CategoryPrice {
                category: p.category,
                price: p.price,
            })
            .collect();

        Ok(BrandCombination {
            brand,
            category_prices,
            total,
        })
    }

    // == Category Extremes ==
    /// Cached min and max when both are present; otherwise both are
    /// recomputed from one store pass and the cache repopulated. The pair is
    /// never mixed from two sources.
    pub async fn category_extremes(&self, category: &str) -> Result<CategoryExtremes> {
        let min = self.caches.get_min_price(category).await?;
        let max = self.caches.get_max_price(category).await?;

        if let (Some(min), Some(max)) = (min, max) {
            return Ok(CategoryExtremes {
                category: category.to_string(),
                min_brand: min.brand,
                min_price: min.price,
                max_brand: max.brand,
                max_price: max.price,
            });
        }

        let (min, max) = self.store.read().await.category_price_extremes(category)?;
        self.caches
            .put_min_price(category, PriceEntry::from(&min))
            .await?;
        self.caches
            .put_max_price(category, PriceEntry::from(&max))
            .await?;

        Ok(CategoryExtremes {
            category: category.to_string(),
            min_brand: min.brand,
            min_price: min.price,
            max_brand: max.brand,
            max_price: max.price,
        })
    }
}
