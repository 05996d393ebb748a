//! Async connection pool backed by bb8 and diesel-async.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Pool handle shared through `AppState`.
///
/// bb8::Pool is an Arc internally, so cloning only bumps a reference count.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// Builds the pool and opens `min_connections` connections up front.
///
/// # Errors
///
/// Returns `AppError::ConnectionPool` when the database is unreachable.
pub async fn establish_async_connection_pool(config: &DatabaseConfig) -> AppResult<AsyncDbPool> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.url);
    Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::anyhow!("Failed to build connection pool: {}", e),
        })
}

/// Same pool without opening any connection. Used where a handle is needed
/// but the database may be absent, e.g. router tests.
pub fn lazy_connection_pool(config: &DatabaseConfig) -> AsyncDbPool {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.url);
    Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build_unchecked(manager)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lazy_pool_uses_configured_size() {
        let config = DatabaseConfig {
            url: "postgres://nobody@127.0.0.1:1/none".to_string(),
            max_connections: 3,
            ..Default::default()
        };
        let pool = lazy_connection_pool(&config);
        assert_eq!(pool.state().connections, 0);
    }
}
