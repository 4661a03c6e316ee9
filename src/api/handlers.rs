//! API Handlers
//!
//! HTTP request handlers for each catalog service endpoint. Mutation handlers
//! commit to the store on the request path and submit a commit notification
//! before responding; the cache update itself runs on the notifier's workers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tokio::sync::RwLock;

use crate::cache::DerivedCaches;
use crate::error::{CatalogError, Result};
use crate::models::{
    CategoryExtremesResponse, CheapestBrandResponse, CreateBrandRequest, CreateProductRequest,
    HealthResponse, MessageResponse, MinPriceByCategoryResponse, ProductResponse,
    RenameBrandRequest, StatsResponse, UpdateProductRequest,
};
use crate::notify::{MutationEvent, MutationNotifier};
use crate::query::QueryFacade;
use crate::store::CatalogStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Authoritative catalog store
    pub store: Arc<RwLock<CatalogStore>>,
    /// The three derived-value maps
    pub caches: Arc<DerivedCaches>,
    /// Commit-notification submission handle
    pub notifier: MutationNotifier,
    /// Cache-first read side
    pub queries: QueryFacade,
}

impl AppState {
    /// Assembles the state from its already-constructed parts.
    pub fn new(
        store: Arc<RwLock<CatalogStore>>,
        caches: Arc<DerivedCaches>,
        notifier: MutationNotifier,
    ) -> Self {
        let queries = QueryFacade::new(store.clone(), caches.clone());
        Self {
            store,
            caches,
            notifier,
            queries,
        }
    }
}

// == Product Mutations ==

/// Handler for POST /products
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<Json<ProductResponse>> {
    if let Some(msg) = req.validate() {
        return Err(CatalogError::InvalidInput(msg));
    }

    let product = state
        .store
        .write()
        .await
        .create_product(&req.brand, &req.category, req.price)?;

    // Committed; announce it. The response does not wait for the cache.
    state
        .notifier
        .submit(MutationEvent::Created(product.clone()))
        .await;

    Ok(Json(product.into()))
}

/// Handler for PUT /products/:id
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(product_id): Path<u64>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>> {
    if let Some(msg) = req.validate() {
        return Err(CatalogError::InvalidInput(msg));
    }

    let (old, new) = state
        .store
        .write()
        .await
        .update_price(product_id, req.price)?;

    state
        .notifier
        .submit(MutationEvent::Updated {
            old,
            new: new.clone(),
        })
        .await;

    Ok(Json(new.into()))
}

/// Handler for DELETE /products/:id
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(product_id): Path<u64>,
) -> Result<Json<MessageResponse>> {
    let deleted = state.store.write().await.delete_product(product_id)?;

    state
        .notifier
        .submit(MutationEvent::Deleted(deleted))
        .await;

    Ok(Json(MessageResponse::new(format!(
        "Product {product_id} deleted"
    ))))
}

// == Brand Mutations ==

/// Handler for POST /brands
pub async fn create_brand_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateBrandRequest>,
) -> Result<Json<MessageResponse>> {
    if let Some(msg) = req.validate() {
        return Err(CatalogError::InvalidInput(msg));
    }

    state.store.write().await.create_brand(&req.name)?;
    Ok(Json(MessageResponse::new(format!(
        "Brand '{}' created",
        req.name
    ))))
}

/// Handler for PUT /brands/:name
pub async fn rename_brand_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<RenameBrandRequest>,
) -> Result<Json<MessageResponse>> {
    if let Some(msg) = req.validate() {
        return Err(CatalogError::InvalidInput(msg));
    }

    state.store.write().await.rename_brand(&name, &req.new_name)?;
    Ok(Json(MessageResponse::new(format!(
        "Brand '{}' renamed to '{}'",
        name, req.new_name
    ))))
}

/// Handler for DELETE /brands/:name
pub async fn delete_brand_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.store.write().await.delete_brand(&name)?;
    Ok(Json(MessageResponse::new(format!("Brand '{name}' deleted"))))
}

// == Derived Queries ==

/// Handler for GET /queries/min-price-by-category
pub async fn min_price_by_category_handler(
    State(state): State<AppState>,
) -> Result<Json<MinPriceByCategoryResponse>> {
    let report = state.queries.min_price_by_category().await?;
    Ok(Json(report.into()))
}

/// Handler for GET /queries/cheapest-brand
pub async fn cheapest_brand_handler(
    State(state): State<AppState>,
) -> Result<Json<CheapestBrandResponse>> {
    let combo = state.queries.cheapest_brand_combination().await?;
    Ok(Json(combo.into()))
}

/// Handler for GET /queries/category-extremes/:category
pub async fn category_extremes_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<CategoryExtremesResponse>> {
    let extremes = state.queries.category_extremes(&category).await?;
    Ok(Json(extremes.into()))
}

// == Observability ==

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.caches.aggregate_stats().await;
    Json(stats.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::engine::AggregateUpdateEngine;

    fn test_state() -> AppState {
        let mut store = CatalogStore::new();
        store.create_brand("Nike").unwrap();
        store.add_category("top").unwrap();
        let store = Arc::new(RwLock::new(store));

        let caches = Arc::new(DerivedCaches::with_settings(300, 1000, 1000));
        let engine = AggregateUpdateEngine::new(caches.clone());
        let config = Config {
            retry_backoff_ms: 10,
            ..Config::default()
        };
        let (notifier, _handle) = MutationNotifier::start(engine, &config);
        AppState::new(store, caches, notifier)
    }

    #[tokio::test]
    async fn test_create_product_handler() {
        let state = test_state();

        let req = CreateProductRequest {
            brand: "Nike".to_string(),
            category: "top".to_string(),
            price: 8000,
        };
        let response = create_product_handler(State(state.clone()), Json(req))
            .await
            .unwrap();
        assert_eq!(response.brand, "Nike");

        // Committed to the store regardless of cache timing
        assert!(state.store.read().await.find_by_id(response.id).is_ok());
    }

    #[tokio::test]
    async fn test_create_product_rejects_invalid_input() {
        let state = test_state();

        let req = CreateProductRequest {
            brand: "Nike".to_string(),
            category: "top".to_string(),
            price: -1,
        };
        let result = create_product_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CatalogError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_create_product_unknown_brand_is_not_found() {
        let state = test_state();

        let req = CreateProductRequest {
            brand: "Puma".to_string(),
            category: "top".to_string(),
            price: 8000,
        };
        let result = create_product_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete_product_handlers() {
        let state = test_state();

        let created = create_product_handler(
            State(state.clone()),
            Json(CreateProductRequest {
                brand: "Nike".to_string(),
                category: "top".to_string(),
                price: 8000,
            }),
        )
        .await
        .unwrap();

        let updated = update_product_handler(
            State(state.clone()),
            Path(created.id),
            Json(UpdateProductRequest { price: 9500 }),
        )
        .await
        .unwrap();
        assert_eq!(updated.price, 9500);

        delete_product_handler(State(state.clone()), Path(created.id))
            .await
            .unwrap();
        assert!(state.store.read().await.find_by_id(created.id).is_err());
    }

    #[tokio::test]
    async fn test_failed_mutation_produces_no_cache_entry() {
        // A rejected create must never pollute the cache.
        let state = test_state();

        let req = CreateProductRequest {
            brand: "Puma".to_string(), // unknown brand, store refuses
            category: "top".to_string(),
            price: 8000,
        };
        let _ = create_product_handler(State(state.clone()), Json(req)).await;

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert!(state.caches.get_min_price("top").await.unwrap().is_none());
        assert!(state.caches.get_brand_total("Puma").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_brand_handlers() {
        let state = test_state();

        create_brand_handler(
            State(state.clone()),
            Json(CreateBrandRequest {
                name: "Puma".to_string(),
            }),
        )
        .await
        .unwrap();

        rename_brand_handler(
            State(state.clone()),
            Path("Puma".to_string()),
            Json(RenameBrandRequest {
                new_name: "PumaLab".to_string(),
            }),
        )
        .await
        .unwrap();

        delete_brand_handler(State(state.clone()), Path("PumaLab".to_string()))
            .await
            .unwrap();
        assert!(!state.store.read().await.brand_exists("PumaLab"));
    }

    #[tokio::test]
    async fn test_stats_handler_counts_cache_traffic() {
        let state = test_state();
        state.caches.get_min_price("top").await.unwrap(); // miss

        let response = stats_handler(State(state)).await;
        assert_eq!(response.misses, 1);
        assert_eq!(response.hits, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
