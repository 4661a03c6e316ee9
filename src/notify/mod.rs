//! Mutation-Commit Notifier Module
//!
//! Outbox-style delivery of "product mutation committed" notifications to the
//! aggregate update engine: strictly after the store mutation succeeded, off
//! the request thread, with bounded concurrency and retry on transient cache
//! failures.

mod dispatcher;

pub use dispatcher::MutationNotifier;

use crate::store::Product;

// == Mutation Event ==
/// A committed product mutation, carrying the state the engine needs for
/// delta computation. Constructed only after the store reported success, so a
/// rolled-back mutation never produces an event.
#[derive(Debug, Clone)]
pub enum MutationEvent {
    Created(Product),
    Updated { old: Product, new: Product },
    Deleted(Product),
}
