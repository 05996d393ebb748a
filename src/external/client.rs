use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Builds the HTTP client used for calls to third-party APIs.
///
/// One client is built per provider and shared by clones of it, so
/// connections are pooled across requests.
///
/// # Arguments
/// * `timeout` - Whole-request timeout; connecting is capped at 10s
pub fn build_client(timeout: Duration) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        .gzip(true)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::new(e).context("Failed to build HTTP client"),
        })
}
