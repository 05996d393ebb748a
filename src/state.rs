//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::{JwtConfig, StripeConfig};
use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::repositories::Repositories;
use crate::services::{PaymentGateway, Services};

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool
    pub db_pool: AsyncDbPool,
    /// Secret and lifetime of customer tokens
    pub jwt_config: JwtConfig,
}

impl AppState {
    /// Creates a new AppState from a database connection pool.
    ///
    /// Initializes all repositories and services from the provided pool
    /// and builds the Stripe client.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool, settings.jwt, &settings.stripe)?;
    /// ```
    pub fn new(pool: AsyncDbPool, jwt_config: JwtConfig, stripe: &StripeConfig) -> AppResult<Self> {
        let repos = Repositories::new(pool.clone());
        let services = Services::new(repos, jwt_config.clone(), stripe)?;
        Ok(Self {
            services,
            db_pool: pool,
            jwt_config,
        })
    }

    /// Same as [`AppState::new`] with a caller supplied payment gateway.
    pub fn with_gateway(
        pool: AsyncDbPool,
        jwt_config: JwtConfig,
        stripe: &StripeConfig,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        let repos = Repositories::new(pool.clone());
        let services = Services::with_gateway(repos, jwt_config.clone(), stripe, gateway);
        Self {
            services,
            db_pool: pool,
            jwt_config,
        }
    }
}
