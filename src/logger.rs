//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggerSettings};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level so operators can
/// raise verbosity without touching configuration files. Must be called at
/// most once per process.
pub fn init_logger(settings: &LoggerSettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))?;

    match settings.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
    Ok(())
}
