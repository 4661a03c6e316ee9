//! Catalog Cache - a product catalog service with cached derived aggregates
//!
//! CRUD over brands and products backed by an authoritative store, with three
//! derived projections (per-category min/max price, per-brand total) kept in
//! process-local bounded caches and refreshed by post-commit notifications.

pub mod api;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod notify;
pub mod query;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweep_task;
