//! CLI argument parsing with clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// REST backend of the Turing shop
#[derive(Parser, Debug)]
#[command(name = "turing-shop")]
#[command(about = "REST backend for the Turing shop catalog, customers, carts and orders")]
#[command(long_about = "
turing-shop serves the shop API (catalog, customers, shopping cart, orders,
shipping, tax and Stripe payments) on top of PostgreSQL.

EXAMPLES:
    # Start the server with the layered configuration in ./config
    turing-shop serve

    # Bind to every interface on port 8080
    turing-shop serve --host 0.0.0.0 --port 8080

    # Use one configuration file instead of the layered directory
    turing-shop --config /etc/turing-shop/shop.toml serve

    # Check configuration without starting the server
    turing-shop serve --dry-run

    # Apply pending migrations, list them, or revert the last one
    turing-shop migrate
    turing-shop migrate --dry-run
    turing-shop migrate --rollback
")]
#[command(version = crate::build::PKG_VERSION, long_version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file used instead of the layered config directory
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override SHOP_APP_ENV
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Address to bind, e.g. 127.0.0.1 or 0.0.0.0
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// TCP port to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level, wins over --verbose and --quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply, list or revert database migrations
    Migrate {
        /// List pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Revert the most recent migrations (one when no count is given)
        #[arg(
            long,
            value_name = "STEPS",
            num_args = 0..=1,
            default_missing_value = "1",
            value_parser = super::validation::validate_rollback_steps
        )]
        rollback: Option<u32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["turing-shop", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["turing-shop"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from([
            "turing-shop",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--log-level",
            "warning",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Serve {
                host,
                port,
                log_level,
                dry_run,
            }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
                assert_eq!(log_level, Some(LogLevel::Warn));
                assert!(!dry_run);
            }
            other => panic!("Expected Serve command, got {other:?}"),
        }
    }

    #[test]
    fn test_rollback_defaults_to_one_step() {
        let cli = Cli::try_parse_from(["turing-shop", "migrate", "--rollback"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Migrate {
                dry_run: false,
                rollback: Some(1)
            })
        ));

        let cli = Cli::try_parse_from(["turing-shop", "migrate", "--rollback", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Migrate {
                rollback: Some(3),
                ..
            })
        ));
    }

    #[test]
    fn test_dry_run_conflicts_with_rollback() {
        let err = Cli::try_parse_from(["turing-shop", "migrate", "--dry-run", "--rollback"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_env_alias() {
        let cli = Cli::try_parse_from(["turing-shop", "--env", "prod"]).unwrap();
        assert_eq!(cli.env, Some(Environment::Production));
        assert!(crate::config::Environment::from(Environment::Production).is_production());
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["turing-shop", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
