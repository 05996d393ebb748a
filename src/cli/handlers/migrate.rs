//! `turing-shop migrate`

use crate::config::Settings;
use crate::db;
use crate::error::AppResult;

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Lists (`dry_run`), reverts (`rollback`) or applies migrations.
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;
        let url = &self.config.database.url;

        if dry_run {
            let pending = db::pending_migrations(url).await?;
            if pending.is_empty() {
                println!("No pending migrations, database is up to date");
            } else {
                println!("{} pending migration(s):", pending.len());
                for name in &pending {
                    println!("  - {}", name);
                }
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            let reverted = db::revert_migrations(url, steps).await?;
            tracing::info!(count = reverted.len(), "Migrations reverted");
            for version in &reverted {
                println!("Reverted {}", version);
            }
            return Ok(());
        }

        let applied = db::run_pending_migrations(url).await?;
        tracing::info!(count = applied.len(), "Migrations applied");
        if applied.is_empty() {
            println!("No migrations to apply");
        }
        for version in &applied {
            println!("Applied {}", version);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_rejects_non_postgres_url_before_connecting() {
        let mut config = Settings::default();
        config.database.url = "mysql://localhost/shop".to_string();

        let result = MigrateCommandHandler::new(config).execute(true, None).await;
        assert!(matches!(
            result,
            Err(AppError::Configuration { key, .. }) if key == "database.url"
        ));
    }
}
