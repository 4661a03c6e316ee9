//! Persistent Catalog Store Module
//!
//! The authoritative source of truth for brands, categories, and products.
//! An in-process stand-in for a relational store: point lookups, per-category
//! and per-brand scans, aggregate queries, and durable mutation primitives.

mod catalog;
mod seed;

pub use catalog::{BrandSum, CatalogStore, Product};
pub use seed::seed_demo_catalog;
