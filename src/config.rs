//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// These are static startup parameters, not runtime-mutable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Time-to-live from last write for all derived cache entries, in seconds
    pub cache_ttl_secs: u64,
    /// Maximum entries for each of the min/max price caches
    pub price_cache_capacity: usize,
    /// Maximum entries for the brand-total cache
    pub brand_cache_capacity: usize,
    /// Maximum concurrently running cache-update workers
    pub worker_pool_size: usize,
    /// Bounded backlog of pending commit notifications; submitters block when full
    pub notify_backlog: usize,
    /// Attempts per cache update before giving up on a transient failure
    pub retry_attempts: u32,
    /// Fixed backoff between retry attempts, in milliseconds
    pub retry_backoff_ms: u64,
    /// Background expired-entry sweep interval in seconds
    pub sweep_interval_secs: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECS` - Derived cache TTL in seconds (default: 600)
    /// - `PRICE_CACHE_CAPACITY` - Min/max price cache capacity (default: 100000)
    /// - `BRAND_CACHE_CAPACITY` - Brand-total cache capacity (default: 50000)
    /// - `WORKER_POOL_SIZE` - Concurrent cache-update workers (default: 100)
    /// - `NOTIFY_BACKLOG` - Commit-notification queue capacity (default: 500)
    /// - `RETRY_ATTEMPTS` - Cache-write retry attempts (default: 3)
    /// - `RETRY_BACKOFF_MS` - Backoff between retries (default: 1000)
    /// - `SWEEP_INTERVAL_SECS` - Expiry sweep frequency (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            cache_ttl_secs: env_or("CACHE_TTL_SECS", 600),
            price_cache_capacity: env_or("PRICE_CACHE_CAPACITY", 100_000),
            brand_cache_capacity: env_or("BRAND_CACHE_CAPACITY", 50_000),
            worker_pool_size: env_or("WORKER_POOL_SIZE", 100),
            notify_backlog: env_or("NOTIFY_BACKLOG", 500),
            retry_attempts: env_or("RETRY_ATTEMPTS", 3),
            retry_backoff_ms: env_or("RETRY_BACKOFF_MS", 1000),
            sweep_interval_secs: env_or("SWEEP_INTERVAL_SECS", 60),
            server_port: env_or("SERVER_PORT", 3000),
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 600,
            price_cache_capacity: 100_000,
            brand_cache_capacity: 50_000,
            worker_pool_size: 100,
            notify_backlog: 500,
            retry_attempts: 3,
            retry_backoff_ms: 1000,
            sweep_interval_secs: 60,
            server_port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl_secs, 600);
        assert_eq!(config.price_cache_capacity, 100_000);
        assert_eq!(config.brand_cache_capacity, 50_000);
        assert_eq!(config.worker_pool_size, 100);
        assert_eq!(config.notify_backlog, 500);
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_backoff_ms, 1000);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_TTL_SECS");
        env::remove_var("PRICE_CACHE_CAPACITY");
        env::remove_var("BRAND_CACHE_CAPACITY");
        env::remove_var("WORKER_POOL_SIZE");
        env::remove_var("NOTIFY_BACKLOG");
        env::remove_var("RETRY_ATTEMPTS");
        env::remove_var("RETRY_BACKOFF_MS");
        env::remove_var("SWEEP_INTERVAL_SECS");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.cache_ttl_secs, 600);
        assert_eq!(config.worker_pool_size, 100);
        assert_eq!(config.server_port, 3000);
    }
}
