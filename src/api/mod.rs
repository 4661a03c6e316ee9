//! API Module
//!
//! HTTP handlers and routing for the catalog service REST API.
//!
//! # Endpoints
//! - `POST /products` - Create a product
//! - `PUT /products/:id` - Change a product's price
//! - `DELETE /products/:id` - Delete a product
//! - `POST /brands` - Create a brand
//! - `PUT /brands/:name` - Rename a brand
//! - `DELETE /brands/:name` - Delete a brand
//! - `GET /queries/min-price-by-category` - Cheapest product per category
//! - `GET /queries/cheapest-brand` - Cheapest-total brand combination
//! - `GET /queries/category-extremes/:category` - Per-category price extremes
//! - `GET /stats` - Derived-cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
