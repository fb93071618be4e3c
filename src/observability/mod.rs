//! # Observability
//!
//! Tracing subscriber setup for the `msoctl` binary. The library itself only
//! emits events through `tracing` and never installs a subscriber.

use crate::config::{LogFormat, ShareOptionsConfig};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
fn default_filter(config: &ShareOptionsConfig) -> Result<EnvFilter> {
    let level = config.log_level.to_lowercase();
    EnvFilter::try_new(format!("manila_share_options={level},msoctl={level}"))
        .map_err(|e| anyhow::anyhow!("Invalid LOG_LEVEL '{}': {e}", config.log_level))
}

/// Install the global tracing subscriber
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing(config: &ShareOptionsConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => default_filter(config)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.with_ansi(config.log_enable_color).try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}
