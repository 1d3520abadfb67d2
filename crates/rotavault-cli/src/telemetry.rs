//! Tracing subscriber bootstrap for the CLI binary.
//!
//! Log lines go to stderr so that dry-run invocation lines on stdout stay
//! machine-readable.

use std::io;

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Default logging target when `RUST_LOG` is not provided.
pub(crate) const DEFAULT_LOG_LEVEL: &str = "info";

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a subscriber has already been installed globally.
pub(crate) fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}
