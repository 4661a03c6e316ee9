//! Catalog Cache - a product catalog service with cached derived aggregates
//!
//! Serves brand/product CRUD plus three derived price queries, keeping the
//! derived values in bounded in-memory caches synchronized by post-commit
//! notifications.

mod api;
mod cache;
mod config;
mod engine;
mod error;
mod models;
mod notify;
mod query;
mod store;
mod tasks;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use cache::DerivedCaches;
use config::Config;
use engine::AggregateUpdateEngine;
use notify::MutationNotifier;
use store::{seed_demo_catalog, CatalogStore};
use tasks::spawn_sweep_task;

/// Main entry point for the catalog service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Seed the catalog store
/// 4. Create the derived caches and aggregate update engine
/// 5. Start the mutation notifier and background expiry sweep
/// 6. Create Axum router with all endpoints
/// 7. Start HTTP server on configured port
/// 8. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Catalog Cache Server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: ttl={}s, price_cap={}, brand_cap={}, workers={}, backlog={}, port={}",
        config.cache_ttl_secs,
        config.price_cache_capacity,
        config.brand_cache_capacity,
        config.worker_pool_size,
        config.notify_backlog,
        config.server_port
    );

    // Seed the authoritative store
    let mut catalog = CatalogStore::new();
    seed_demo_catalog(&mut catalog)?;
    let store = Arc::new(RwLock::new(catalog));

    // Derived caches and the engine that maintains them
    let caches = Arc::new(DerivedCaches::from_config(&config));
    let engine = AggregateUpdateEngine::new(caches.clone());

    // Post-commit notification pipeline
    let (notifier, notifier_handle) = MutationNotifier::start(engine, &config);

    // Background expiry sweep
    let sweep_handle = spawn_sweep_task(caches.clone(), config.sweep_interval_secs);
    info!("Background expiry sweep started");

    // Create router with all endpoints
    let state = AppState::new(store, caches, notifier);
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(vec![sweep_handle, notifier_handle]))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the background tasks and allows graceful shutdown.
async fn shutdown_signal(background_handles: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    for handle in background_handles {
        handle.abort();
    }
    warn!("Background tasks aborted");
}
