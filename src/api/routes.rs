//! API Routes
//!
//! Configures the Axum router with all catalog service endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    category_extremes_handler, cheapest_brand_handler, create_brand_handler,
    create_product_handler, delete_brand_handler, delete_product_handler, health_handler,
    min_price_by_category_handler, rename_brand_handler, stats_handler, update_product_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/products", post(create_product_handler))
        .route(
            "/products/:id",
            put(update_product_handler).delete(delete_product_handler),
        )
        .route("/brands", post(create_brand_handler))
        .route(
            "/brands/:name",
            put(rename_brand_handler).delete(delete_brand_handler),
        )
        .route(
            "/queries/min-price-by-category",
            get(min_price_by_category_handler),
        )
        .route("/queries/cheapest-brand", get(cheapest_brand_handler))
        .route(
            "/queries/category-extremes/:category",
            get(category_extremes_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
