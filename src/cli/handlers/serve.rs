//! `turing-shop serve`

use crate::config::Settings;
use crate::db;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        self.validate()?;

        if dry_run {
            println!("Configuration is valid");
            println!("Server would bind to {}", self.config.server.address());
            return Ok(());
        }

        if self.config.database.auto_migrate {
            let applied = db::run_pending_migrations(&self.config.database.url).await?;
            tracing::info!(count = applied.len(), "Pending migrations applied at startup");
        }

        Server::new(self.config).run().await
    }

    /// Everything the server needs before binding, secrets included.
    fn validate(&self) -> anyhow::Result<()> {
        self.config.validate()?;
        self.config.jwt.validate()?;
        self.config.stripe.validate_secrets()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/shop".to_string();
        config.jwt.secret = "0123456789abcdef0123456789abcdef".to_string();
        config.stripe.secret_key = "sk_test_123".to_string();
        config.stripe.webhook_secret = "whsec_123".to_string();
        config
    }

    #[tokio::test]
    async fn test_dry_run_with_valid_config() {
        assert!(ServeCommandHandler::new(valid_config()).execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_requires_jwt_secret() {
        let mut config = valid_config();
        config.jwt.secret.clear();

        let err = ServeCommandHandler::new(config)
            .execute(true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("jwt.secret"));
    }

    #[tokio::test]
    async fn test_dry_run_requires_webhook_secret() {
        let mut config = valid_config();
        config.stripe.webhook_secret.clear();

        let err = ServeCommandHandler::new(config)
            .execute(true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("stripe.webhook_secret"));
    }
}
