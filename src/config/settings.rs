//! Configuration settings structures.
//!
//! All settings can be loaded from TOML files and overridden through
//! `BLOG_USERS_*` environment variables.

use serde::Deserialize;

use crate::config::error::ConfigError;

fn default_app_name() -> String {
    "blog-users".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Top-level application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub server: ServerSettings,
    pub logger: LoggerSettings,
}

impl Settings {
    /// Validates the loaded settings before the server starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                field: "server.port".to_string(),
                reason: "port 0 is not a bindable address".to_string(),
            });
        }
        const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logger.level.as_str()) {
            return Err(ConfigError::Invalid {
                field: "logger.level".to_string(),
                reason: format!(
                    "'{}' is not one of: {}",
                    self.logger.level,
                    LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApplicationSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSettings {
    /// Bind address in `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}
