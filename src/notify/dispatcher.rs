//! Notification Dispatcher
//!
//! Consumes commit notifications from a bounded backlog and applies them to
//! the cache via the aggregate update engine, with a semaphore capping how
//! many updates run at once.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::engine::AggregateUpdateEngine;
use crate::notify::MutationEvent;

// == Mutation Notifier ==
/// Submission handle for commit notifications.
///
/// Cloneable; handlers submit after their store mutation commits and return
/// to the client without waiting for the cache update. When the backlog is
/// full, `submit` blocks the caller instead of dropping the event.
#[derive(Debug, Clone)]
pub struct MutationNotifier {
    tx: mpsc::Sender<MutationEvent>,
}

impl MutationNotifier {
    /// Starts the dispatcher task and returns the submission handle plus the
    /// task handle for shutdown.
    ///
    /// The dispatcher drains until every submission handle is dropped, then
    /// exits on its own; aborting the handle is only needed for a hard stop.
    pub fn start(engine: AggregateUpdateEngine, config: &Config) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<MutationEvent>(config.notify_backlog);
        let semaphore = Arc::new(Semaphore::new(config.worker_pool_size));
        let attempts = config.retry_attempts.max(1);
        let backoff = Duration::from_millis(config.retry_backoff_ms);
        let workers = config.worker_pool_size;
        let backlog = config.notify_backlog;

        let handle = tokio::spawn(async move {
            info!("Mutation notifier started: {workers} workers, backlog {backlog}");

            while let Some(event) = rx.recv().await {
                let permit = match semaphore.clone().acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => break,
                };
                let engine = engine.clone();
                tokio::spawn(async move {
                    let _permit = permit;
                    apply_with_retry(&engine, &event, attempts, backoff).await;
                });
            }

            info!("Mutation notifier drained");
        });

        (Self { tx }, handle)
    }

    /// Enqueues a committed mutation. Blocks while the backlog is full.
    pub async fn submit(&self, event: MutationEvent) {
        if self.tx.send(event).await.is_err() {
            // The triggering request already committed and responded; the
            // store stays authoritative, queries will fall back to it.
            error!("Commit notification dropped: dispatcher is no longer running");
        }
    }
}

// == Retry Loop ==
/// Applies one event, retrying only transient cache failures with a fixed
/// backoff. The store mutation is already durable, so it is never retried
/// here; exhausted retries are reported to the log, not to the caller.
async fn apply_with_retry(
    engine: &AggregateUpdateEngine,
    event: &MutationEvent,
    attempts: u32,
    backoff: Duration,
) {
    let mut attempt = 1;
    loop {
        match apply(engine, event).await {
            Ok(()) => return,
            Err(err) if err.is_transient() && attempt < attempts => {
                warn!(
                    "Cache update attempt {}/{} failed transiently: {}",
                    attempt, attempts, err
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(err) => {
                error!(
                    "Cache update failed after {} attempt(s): {}; store remains authoritative",
                    attempt, err
                );
                return;
            }
        }
    }
}

async fn apply(
    engine: &AggregateUpdateEngine,
    event: &MutationEvent,
) -> crate::error::Result<()> {
    match event {
        MutationEvent::Created(product) => engine.product_created(product).await,
        MutationEvent::Updated { old, new } => engine.product_updated(old, new).await,
        MutationEvent::Deleted(product) => engine.product_deleted(product).await,
    }
}
