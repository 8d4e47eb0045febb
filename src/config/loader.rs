//! Layered configuration loading.
//!
//! Sources are merged in order of increasing priority:
//! 1. `default.toml`
//! 2. `{environment}.toml` (e.g. `production.toml`)
//! 3. `local.toml`
//! 4. `BLOG_USERS_*` environment variables
//!
//! All files are optional; missing files fall back to the compiled-in
//! defaults on `Settings`.

use std::path::PathBuf;

use config::{Config, Environment as EnvSource, File};

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable selecting the configuration directory.
const CONFIG_DIR_ENV: &str = "BLOG_USERS_CONFIG_DIR";

/// Default configuration directory, relative to the working directory.
const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "BLOG_USERS";

/// Separator for nested keys in environment variables,
/// e.g. `BLOG_USERS_SERVER__PORT=9000`.
const ENV_SEPARATOR: &str = "__";

/// Loads `Settings` from layered TOML files plus environment overrides.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    environment: Environment,
}

impl ConfigLoader {
    /// Creates a loader using `BLOG_USERS_CONFIG_DIR` (or `config/`) and the
    /// environment from `APP_ENV`.
    pub fn new() -> Self {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));
        Self::with_dir(config_dir)
    }

    /// Creates a loader reading from a specific directory.
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self {
            config_dir,
            environment: Environment::from_env(),
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Loads and validates settings from all sources.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(self.config_dir.join("default.toml")).required(false))
            .add_source(
                File::from(
                    self.config_dir
                        .join(format!("{}.toml", self.environment.as_str())),
                )
                .required(false),
            )
            .add_source(File::from(self.config_dir.join("local.toml")).required(false))
            .add_source(EnvSource::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .build()?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
