//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::error::{PaddockError, Result};

/// Install a global fmt subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence; otherwise `level` (e.g. "info",
/// "paddock_storage=debug") is used. Fails if a global subscriber is
/// already set or the directive does not parse.
pub fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| PaddockError::Config(format!("Invalid log level '{}': {}", level, e)))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| PaddockError::Config(format!("Failed to install subscriber: {}", e)))?;

    tracing::debug!(level, "Tracing initialized");
    Ok(())
}
