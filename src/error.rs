//! Error types for the catalog service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Catalog Error Enum ==
/// Unified error type for the catalog service.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Referenced brand/category/product does not exist in the store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request failed validation before any mutation was attempted
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An update expected a warm brand-total cache entry and found none.
    /// The entry should have been seeded at product creation; recomputing it
    /// silently here could mask a lost create notification.
    #[error("Brand total missing from cache: {0}")]
    BrandCacheMissing(String),

    /// The cache backend is temporarily unreachable; retried by the notifier
    #[error("Transient cache failure: {0}")]
    TransientCacheFailure(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// True for failures the notifier should retry with backoff.
    pub fn is_transient(&self) -> bool {
        matches!(self, CatalogError::TransientCacheFailure(_))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CatalogError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CatalogError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CatalogError::BrandCacheMissing(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            CatalogError::TransientCacheFailure(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, msg.clone())
            }
            CatalogError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog service.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_cache_failures_are_transient() {
        assert!(CatalogError::TransientCacheFailure("backend unreachable".into()).is_transient());
        assert!(!CatalogError::NotFound("brand X".into()).is_transient());
        assert!(!CatalogError::BrandCacheMissing("brand X".into()).is_transient());
        assert!(!CatalogError::InvalidInput("negative price".into()).is_transient());
    }
}
