use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),
    #[error("global subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Installs the process-wide subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str, debug: bool) -> Result<(), LoggingError> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level
            .parse()
            .map_err(|_| LoggingError::InvalidLevel(level.to_string()))?
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| LoggingError::AlreadyInstalled(e.to_string()))
}
