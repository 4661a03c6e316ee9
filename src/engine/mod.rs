//! Aggregate Update Engine Module
//!
//! Keeps the three derived-value maps consistent with committed product
//! mutations, without ever locking the persistent store.

mod update;

pub use update::AggregateUpdateEngine;
