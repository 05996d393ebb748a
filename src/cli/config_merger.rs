//! Applies command-line overrides on top of file based settings
//!
//! Precedence, lowest first: config files, `SHOP_*` variables, global flags
//! (`--verbose`/`--quiet`), subcommand flags.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base settings the way the CLI asks for.
    ///
    /// `--config` selects single file mode, `--env` overrides `SHOP_APP_ENV`.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = match &cli.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new()?,
        };
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        Ok(Self::new(loader.load()?))
    }

    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn base() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/shop".to_string();
        settings
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(base()).merge_cli_args(&cli)
    }

    #[test]
    fn test_no_overrides_keeps_base() {
        assert_eq!(merge(&["turing-shop"]).unwrap(), base());
    }

    #[test]
    fn test_serve_overrides_host_and_port() {
        let settings = merge(&["turing-shop", "serve", "--host", "0.0.0.0", "--port", "9000"])
            .unwrap();
        assert_eq!(settings.server.address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_log_level_precedence() {
        assert_eq!(merge(&["turing-shop", "-v"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["turing-shop", "-q"]).unwrap().logger.level, "error");

        let settings = merge(&["turing-shop", "-v", "serve", "--log-level", "trace"]).unwrap();
        assert_eq!(settings.logger.level, "trace");
    }

    #[test]
    fn test_merged_settings_are_validated() {
        let cli = Cli::try_parse_from(["turing-shop"]).unwrap();
        let result = ConfigurationMerger::new(Settings::default()).merge_cli_args(&cli);
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { field, .. }) if field == "database.url"
        ));
    }

    #[test]
    fn test_from_cli_reads_config_file() {
        let _lock = crate::config::ENV_LOCK
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("shop.toml");
        std::fs::write(
            &path,
            "[database]\nurl = \"postgres://db/shop\"\n\n[server]\nport = 4100\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "turing-shop",
            "--env",
            "test",
            "--config",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let settings = ConfigurationMerger::from_cli(&cli)
            .unwrap()
            .merge_cli_args(&cli)
            .unwrap();

        assert_eq!(settings.server.port, 4100);
        assert_eq!(settings.database.url, "postgres://db/shop");
    }
}
