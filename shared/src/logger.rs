//! Logging utilities

use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Initialize the logger.
///
/// `RUST_LOG` takes precedence over `default_filter`. Calling this more than
/// once is a no-op, so tests may call it freely.
pub fn init_logger(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .try_init()
        .is_err()
    {
        warn!("global subscriber already installed, keeping it");
    }
}

/// Log a serializable summary as one structured event
pub fn log_summary<T: Serialize>(label: &str, summary: &T) {
    match serde_json::to_string(summary) {
        Ok(json) => info!(label = %label, summary = %json, "Station summary"),
        Err(err) => warn!(label = %label, error = %err, "Failed to serialize summary"),
    }
}
