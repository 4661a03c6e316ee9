//! Response DTOs for the catalog service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::query::{BrandCombination, CategoryExtremes, MinPriceReport};
use crate::store::Product;

/// A product as returned by the mutation endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: u64,
    pub brand: String,
    pub category: String,
    pub price: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            brand: product.brand,
            category: product.category,
            price: product.price,
        }
    }
}

/// Plain confirmation message for delete-style endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One row of the per-category minimum report.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPriceRow {
    pub category: String,
    pub brand: String,
    pub price: i64,
}

/// Response for GET /queries/min-price-by-category
#[derive(Debug, Clone, Serialize)]
pub struct MinPriceByCategoryResponse {
    pub rows: Vec<CategoryPriceRow>,
    pub total: i64,
}

impl From<MinPriceReport> for MinPriceByCategoryResponse {
    fn from(report: MinPriceReport) -> Self {
        Self {
            rows: report
                .rows
                .into_iter()
                .map(|row| CategoryPriceRow {
                    category: row.category,
                    brand: row.brand,
                    price: row.price,
                })
                .collect(),
            total: report.total,
        }
    }
}

/// Response for GET /queries/cheapest-brand
#[derive(Debug, Clone, Serialize)]
pub struct CheapestBrandResponse {
    pub brand: String,
    pub category_prices: Vec<CategoryPricePair>,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryPricePair {
    pub category: String,
    pub price: i64,
}

impl From<BrandCombination> for CheapestBrandResponse {
    fn from(combo: BrandCombination) -> Self {
        Self {
            brand: combo.brand,
            category_prices: combo
                .category_prices
                .into_iter()
                .map(|cp| CategoryPricePair {
                    category: cp.category,
                    price: cp.price,
                })
                .collect(),
            total: combo.total,
        }
    }
}

/// Brand/price pair for one side of the extremes response.
#[derive(Debug, Clone, Serialize)]
pub struct BrandPrice {
    pub brand: String,
    pub price: i64,
}

/// Response for GET /queries/category-extremes/:category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryExtremesResponse {
    pub category: String,
    pub min: BrandPrice,
    pub max: BrandPrice,
}

impl From<CategoryExtremes> for CategoryExtremesResponse {
    fn from(extremes: CategoryExtremes) -> Self {
        Self {
            category: extremes.category,
            min: BrandPrice {
                brand: extremes.min_brand,
                price: extremes.min_price,
            },
            max: BrandPrice {
                brand: extremes.max_brand,
                price: extremes.max_price,
            },
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Cache hits across the three derived maps
    pub hits: u64,
    /// Cache misses across the three derived maps
    pub misses: u64,
    /// Evictions by capacity or expiry
    pub evictions: u64,
    /// Current number of entries across the maps
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        let total_requests = stats.hits + stats.misses;
        let hit_rate = if total_requests > 0 {
            stats.hits as f64 / total_requests as f64
        } else {
            0.0
        };
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_response_serialize() {
        let resp = ProductResponse {
            id: 1,
            brand: "Nike".to_string(),
            category: "top".to_string(),
            price: 8000,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Nike"));
        assert!(json.contains("8000"));
    }

    #[test]
    fn test_min_price_response_from_report() {
        let report = MinPriceReport {
            rows: vec![crate::query::MinPriceRow {
                category: "top".to_string(),
                brand: "C".to_string(),
                price: 10000,
            }],
            total: 10000,
        };
        let resp = MinPriceByCategoryResponse::from(report);
        assert_eq!(resp.rows.len(), 1);
        assert_eq!(resp.total, 10000);
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let resp = StatsResponse::from(CacheStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            total_entries: 100,
        });
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(CacheStats::default());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
