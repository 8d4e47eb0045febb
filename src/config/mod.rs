//! Configuration loading and settings.

mod environment;
mod error;
mod loader;
mod settings;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{ApplicationSettings, LogFormat, LoggerSettings, ServerSettings, Settings};
