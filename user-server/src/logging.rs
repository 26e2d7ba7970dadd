//! Tracing setup

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Build the log filter. `RUST_LOG` wins over the configured level.
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global fmt subscriber
pub fn init(config: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_target(false)
        .compact()
        .init();
}
