//! Runs the shop API until the process is asked to stop.
//!
//! Secrets are checked before anything touches the network; connections in
//! flight are drained on SIGINT or SIGTERM.

use anyhow::Context;
use tokio::net::TcpListener;

use crate::api::routes::create_router;
use crate::config::{Environment, ServerConfig, settings::Settings};
use crate::db::establish_async_connection_pool;
use crate::state::AppState;

pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Serves requests until a shutdown signal arrives.
    ///
    /// # Errors
    /// Missing secrets, an unreachable database or an address already in use.
    pub async fn run(self) -> anyhow::Result<()> {
        self.check_secrets()?;
        self.log_startup();

        let state = self.build_state().await?;
        let listener = bind(&self.settings.server).await?;
        tracing::info!(address = %self.settings.server.address(), "Shop API listening");

        axum::serve(listener, create_router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Shop API stopped");
        Ok(())
    }

    fn check_secrets(&self) -> anyhow::Result<()> {
        self.settings
            .jwt
            .validate()
            .context("JWT configuration is not usable")?;
        self.settings
            .stripe
            .validate_secrets()
            .context("Stripe configuration is not usable")?;
        Ok(())
    }

    /// Secrets are only reported as present or absent.
    fn log_startup(&self) {
        let settings = &self.settings;
        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            environment = %Environment::from_env().as_str(),
            "Starting shop API"
        );
        tracing::debug!(
            request_timeout = settings.server.request_timeout,
            keep_alive_timeout = settings.server.keep_alive_timeout,
            max_connections = settings.database.max_connections,
            min_connections = settings.database.min_connections,
            log_level = %settings.logger.level,
            token_lifetime_hours = settings.jwt.expiration_hours,
            stripe_api_base = %settings.stripe.api_base,
            default_currency = %settings.stripe.currency,
            "Effective configuration"
        );
    }

    async fn build_state(&self) -> anyhow::Result<AppState> {
        let pool = establish_async_connection_pool(&self.settings.database)
            .await
            .context("Could not open the database pool")?;
        let state = AppState::new(pool, self.settings.jwt.clone(), &self.settings.stripe)?;
        tracing::debug!("Services wired");
        Ok(state)
    }
}

async fn bind(config: &ServerConfig) -> anyhow::Result<TcpListener> {
    let address = config.address();
    TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!(error = %e, address = %address, "Failed to bind");
        anyhow::anyhow!("Failed to bind to {}: {}", address, e)
    })
}

async fn shutdown_signal() {
    let signal = wait_for_signal().await;
    tracing::info!(signal, "Draining connections before shutdown");
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            tracing::warn!(error = %e, "SIGTERM handler unavailable, only Ctrl+C stops the server");
            return interrupted().await;
        }
    };

    tokio::select! {
        signal = interrupted() => signal,
        _ = terminate.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    interrupted().await
}

async fn interrupted() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    "SIGINT"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/shop".to_string();
        settings.jwt.secret = "0123456789abcdef0123456789abcdef".to_string();
        settings.stripe.secret_key = "sk_test_123".to_string();
        settings.stripe.webhook_secret = "whsec_123".to_string();
        settings
    }

    #[test]
    fn test_secrets_present() {
        assert!(Server::new(settings()).check_secrets().is_ok());
    }

    #[test]
    fn test_missing_webhook_secret_stops_startup() {
        let mut settings = settings();
        settings.stripe.webhook_secret.clear();

        let err = Server::new(settings).check_secrets().unwrap_err();
        assert!(format!("{err:#}").contains("stripe.webhook_secret"));
    }

    #[tokio::test]
    async fn test_run_fails_before_connecting_without_jwt_secret() {
        let mut settings = settings();
        settings.jwt.secret.clear();

        let err = Server::new(settings).run().await.unwrap_err();
        assert!(format!("{err:#}").contains("jwt.secret"));
    }
}
