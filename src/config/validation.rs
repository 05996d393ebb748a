//! Configuration validation rules

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, JwtConfig, LoggerSettings, ServerConfig, Settings, StripeConfig,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.keep_alive_timeout == 0 {
            return Err(ConfigError::validation(
                "server.keep_alive_timeout",
                "Keep-alive timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// The shop only talks to PostgreSQL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Set database.url or SHOP_DATABASE__URL.",
            ));
        }

        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL. Expected postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl JwtConfig {
    /// Checked before the server starts, and by the loader in production.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::validation(
                "jwt.secret",
                "JWT secret cannot be empty",
            ));
        }

        if self.secret.len() < 32 {
            return Err(ConfigError::validation(
                "jwt.secret",
                "JWT secret should be at least 32 characters for security",
            ));
        }

        if self.expiration_hours <= 0 {
            return Err(ConfigError::validation(
                "jwt.expiration_hours",
                "Token expiration must be positive",
            ));
        }

        Ok(())
    }
}

impl StripeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(ConfigError::validation(
                "stripe.api_base",
                "Stripe API base must be an http(s) URL",
            ));
        }

        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::ValidationError {
                field: "stripe.currency".to_string(),
                message: format!("Invalid ISO currency code '{}'", self.currency),
            });
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "stripe.timeout_seconds",
                "Stripe timeout must be greater than 0 seconds.",
            ));
        }

        if self.webhook_tolerance_seconds <= 0 {
            return Err(ConfigError::validation(
                "stripe.webhook_tolerance_seconds",
                "Webhook tolerance must be positive",
            ));
        }

        Ok(())
    }

    /// Keys the server cannot take payments without. Checked with the JWT secret.
    pub fn validate_secrets(&self) -> Result<(), ConfigError> {
        if self.secret_key.trim().is_empty() {
            return Err(ConfigError::validation(
                "stripe.secret_key",
                "Stripe secret key is required. Set stripe.secret_key or SHOP_STRIPE__SECRET_KEY.",
            ));
        }

        if self.webhook_secret.trim().is_empty() {
            return Err(ConfigError::validation(
                "stripe.webhook_secret",
                "Webhook signing secret is required. Set stripe.webhook_secret or SHOP_STRIPE__WEBHOOK_SECRET.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if self.file.enabled && self.file.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.file.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.file.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one of logger.console or logger.file must be enabled.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Returns the first failing section. JWT is checked separately at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        self.stripe.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::FileSettings;

    fn field_of(err: ConfigError) -> String {
        match err {
            ConfigError::ValidationError { field, .. } => field,
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    fn valid_settings() -> Settings {
        Settings {
            database: DatabaseConfig {
                url: "postgres://localhost/shop".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_server_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "server.port");
    }

    #[test]
    fn test_database_requires_postgres_url() {
        for url in ["", "mysql://localhost/shop", "sqlite://shop.db"] {
            let config = DatabaseConfig {
                url: url.to_string(),
                ..Default::default()
            };
            assert_eq!(field_of(config.validate().unwrap_err()), "database.url", "{url}");
        }

        let config = DatabaseConfig {
            url: "postgresql://user:pass@db:5432/shop".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_min_exceeds_max() {
        let config = DatabaseConfig {
            url: "postgres://localhost/shop".to_string(),
            max_connections: 2,
            min_connections: 5,
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "database.min_connections"
        );
    }

    #[test]
    fn test_jwt_secret_rules() {
        let empty = JwtConfig::default();
        assert_eq!(field_of(empty.validate().unwrap_err()), "jwt.secret");

        let short = JwtConfig {
            secret: "short".to_string(),
            ..Default::default()
        };
        let err = short.validate().unwrap_err();
        assert!(err.to_string().contains("at least 32 characters"));

        let zero_hours = JwtConfig {
            secret: "a".repeat(32),
            expiration_hours: 0,
        };
        assert_eq!(
            field_of(zero_hours.validate().unwrap_err()),
            "jwt.expiration_hours"
        );

        let ok = JwtConfig {
            secret: "a".repeat(32),
            expiration_hours: 24,
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_stripe_currency_and_base() {
        let bad_currency = StripeConfig {
            currency: "dollars".to_string(),
            ..Default::default()
        };
        assert_eq!(
            field_of(bad_currency.validate().unwrap_err()),
            "stripe.currency"
        );

        let bad_base = StripeConfig {
            api_base: "api.stripe.com".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(bad_base.validate().unwrap_err()), "stripe.api_base");

        assert!(StripeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_stripe_secrets_are_required() {
        let no_webhook_secret = StripeConfig {
            secret_key: "sk_test_123".to_string(),
            ..Default::default()
        };
        assert_eq!(
            field_of(no_webhook_secret.validate_secrets().unwrap_err()),
            "stripe.webhook_secret"
        );

        let blank_key = StripeConfig {
            secret_key: "  ".to_string(),
            webhook_secret: "whsec_123".to_string(),
            ..Default::default()
        };
        assert_eq!(
            field_of(blank_key.validate_secrets().unwrap_err()),
            "stripe.secret_key"
        );

        let ok = StripeConfig {
            secret_key: "sk_test_123".to_string(),
            webhook_secret: "whsec_123".to_string(),
            ..Default::default()
        };
        assert!(ok.validate_secrets().is_ok());
    }

    #[test]
    fn test_logger_rules() {
        let bad_level = LoggerSettings {
            level: "loud".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(bad_level.validate().unwrap_err()), "logger.level");

        let empty_path = LoggerSettings {
            file: FileSettings {
                enabled: true,
                path: " ".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            field_of(empty_path.validate().unwrap_err()),
            "logger.file.path"
        );
    }

    #[test]
    fn test_settings_validate_order() {
        assert!(valid_settings().validate().is_ok());

        let mut settings = valid_settings();
        settings.server.port = 0;
        settings.database.url.clear();
        assert_eq!(field_of(settings.validate().unwrap_err()), "server.port");

        assert_eq!(
            field_of(Settings::default().validate().unwrap_err()),
            "database.url"
        );
    }
}
