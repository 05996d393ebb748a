//! Configuration loader for turing-shop
//!
//! Resolves where the TOML sources live, stacks them in priority order and
//! finishes with the `SHOP_*` environment overrides.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "SHOP_CONFIG_DIR";
const CONFIG_FILE_ENV: &str = "SHOP_CONFIG_FILE";
const DEFAULT_CONFIG_DIR: &str = "config";
const ENV_PREFIX: &str = "SHOP";
const ENV_SEPARATOR: &str = "__";

/// Where configuration is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    /// `default.toml`, `{env}.toml`, `local.toml` inside a directory
    Layered(PathBuf),
    /// One explicit file, no layering
    Single(PathBuf),
}

/// Configuration loader that handles layered configuration loading
#[derive(Debug)]
pub struct ConfigLoader {
    source: Source,
    environment: Environment,
}

impl ConfigLoader {
    /// Builds a loader from `SHOP_CONFIG_DIR`, `SHOP_CONFIG_FILE` and `SHOP_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Fails when both `SHOP_CONFIG_DIR` and `SHOP_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        let dir = std::env::var(CONFIG_DIR_ENV).ok();
        let file = std::env::var(CONFIG_FILE_ENV).ok();

        let source = match (dir, file) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::mutual_exclusivity(
                    "SHOP_CONFIG_DIR and SHOP_CONFIG_FILE cannot both be set. \
                     Use SHOP_CONFIG_DIR for layered configuration or \
                     SHOP_CONFIG_FILE for a single configuration file.",
                ));
            }
            (None, Some(file)) => Source::Single(PathBuf::from(file)),
            (Some(dir), None) => Source::Layered(PathBuf::from(dir)),
            (None, None) => Source::Layered(PathBuf::from(DEFAULT_CONFIG_DIR)),
        };

        Ok(Self {
            source,
            environment: Environment::from_env(),
        })
    }

    /// Loader for a single file given on the command line.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Single(path.into()),
            environment: Environment::from_env(),
        }
    }

    /// Loader for a layered directory.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Layered(dir.into()),
            environment: Environment::from_env(),
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Loads, deserializes and validates the settings.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;
        if self.environment.is_production() {
            settings.jwt.validate()?;
            settings.stripe.validate_secrets()?;
        }

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = match &self.source {
            Source::Single(file) => add_file(Config::builder(), file, true)?,
            Source::Layered(dir) => {
                let builder = add_file(Config::builder(), &dir.join("default.toml"), true)?;
                let env_file = dir.join(format!("{}.toml", self.environment.as_str()));
                let builder = add_file(builder, &env_file, false)?;
                add_file(builder, &dir.join("local.toml"), false)?
            }
        };

        // SHOP_SERVER__PORT -> server.port
        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()
            .map_err(ConfigError::from)
    }
}

fn add_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if required && !path.is_file() {
        return Err(ConfigError::file_not_found(format!(
            "Required configuration file not found: {}",
            path.display()
        )));
    }

    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_LOCK;
    use std::fs;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
[database]
url = "postgres://localhost/shop"

[jwt]
secret = "0123456789abcdef0123456789abcdef"
"#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    fn clean_env() -> EnvGuard {
        let mut env = EnvGuard::new();
        for key in [
            CONFIG_DIR_ENV,
            CONFIG_FILE_ENV,
            Environment::ENV_VAR,
            "SHOP_SERVER__PORT",
            "SHOP_STRIPE__SECRET_KEY",
            "SHOP_STRIPE__WEBHOOK_SECRET",
        ] {
            env.remove(key);
        }
        env
    }

    #[test]
    fn test_new_defaults_to_config_dir() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _env = clean_env();

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.source, Source::Layered(PathBuf::from("config")));
        assert_eq!(loader.environment(), Environment::Development);
    }

    #[test]
    fn test_dir_and_file_are_mutually_exclusive() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = clean_env();
        env.set(CONFIG_DIR_ENV, "/etc/shop");
        env.set(CONFIG_FILE_ENV, "/etc/shop/shop.toml");

        match ConfigLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains("SHOP_CONFIG_DIR"));
                assert!(msg.contains("SHOP_CONFIG_FILE"));
            }
            other => panic!("Expected MutualExclusivityError, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_default_toml() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _env = clean_env();
        let dir = setup_config_dir(&[]);

        match ConfigLoader::from_dir(dir.path()).load() {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_layers_apply_in_order() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _env = clean_env();
        let dir = setup_config_dir(&[
            ("default.toml", MINIMAL),
            ("staging.toml", "[server]\nport = 4000\n\n[stripe]\ncurrency = \"eur\"\n"),
            ("local.toml", "[server]\nport = 5000\n"),
        ]);

        let settings = ConfigLoader::from_dir(dir.path())
            .with_environment(Environment::Staging)
            .load()
            .expect("Should load layered config");

        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.stripe.currency, "eur");
        assert_eq!(settings.database.url, "postgres://localhost/shop");
    }

    #[test]
    fn test_env_vars_override_files() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = clean_env();
        let dir = setup_config_dir(&[("default.toml", MINIMAL)]);
        env.set("SHOP_SERVER__PORT", "9090");
        env.set("SHOP_STRIPE__SECRET_KEY", "sk_test_env");

        let settings = ConfigLoader::from_dir(dir.path())
            .load()
            .expect("Should load config");

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.stripe.secret_key, "sk_test_env");
    }

    #[test]
    fn test_single_file_skips_layering() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _env = clean_env();
        let dir = setup_config_dir(&[
            ("shop.toml", MINIMAL),
            ("local.toml", "[server]\nport = 5000\n"),
        ]);

        let settings = ConfigLoader::from_file(dir.path().join("shop.toml"))
            .load()
            .expect("Should load single file");

        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_production_requires_strong_jwt_secret() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _env = clean_env();
        let dir = setup_config_dir(&[(
            "default.toml",
            "[database]\nurl = \"postgres://localhost/shop\"\n\n[jwt]\nsecret = \"short\"\n",
        )]);

        let result = ConfigLoader::from_dir(dir.path())
            .with_environment(Environment::Production)
            .load();

        assert!(
            matches!(result, Err(ConfigError::ValidationError { field, .. }) if field == "jwt.secret")
        );
    }

    #[test]
    fn test_production_requires_webhook_secret() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _env = clean_env();
        let dir = setup_config_dir(&[(
            "default.toml",
            "[database]\nurl = \"postgres://localhost/shop\"\n\n[jwt]\nsecret = \"0123456789abcdef0123456789abcdef\"\n\n[stripe]\nsecret_key = \"sk_test_123\"\nwebhook_secret = \"\"\n",
        )]);

        let result = ConfigLoader::from_dir(dir.path())
            .with_environment(Environment::Production)
            .load();

        assert!(
            matches!(result, Err(ConfigError::ValidationError { field, .. }) if field == "stripe.webhook_secret")
        );
    }
}
