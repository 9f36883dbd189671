//! HTTP client construction
//!
//! Every outbound client (content store, ledger node) is built here so pool and
//! timeout settings stay uniform.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;

/// Connection pool settings shared by all clients
#[derive(Debug, Clone)]
pub struct HttpClientPoolConfig {
    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,
    /// Idle connection timeout
    pub pool_idle_timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// TCP keepalive interval
    pub tcp_keepalive: Duration,
    /// User agent string
    pub user_agent: &'static str,
}

impl Default for HttpClientPoolConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: 8,
            pool_idle_timeout: Duration::from_secs(90),
            connect_timeout: Duration::from_secs(10),
            tcp_keepalive: Duration::from_secs(60),
            user_agent: concat!("certmint/", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Create an HTTP client with the given request timeout
pub fn create_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    let config = HttpClientPoolConfig::default();
    debug!(timeout_ms = timeout.as_millis() as u64, "Creating HTTP client");

    ClientBuilder::new()
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(config.pool_idle_timeout)
        .timeout(timeout)
        .connect_timeout(config.connect_timeout.min(timeout))
        .tcp_keepalive(config.tcp_keepalive)
        .tcp_nodelay(true)
        .user_agent(config.user_agent)
        .build()
}
