//! Error types for the tarsnap adapter.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for tarsnap invocations.
#[derive(Debug, Error)]
pub enum TarsnapError {
    /// The tarsnap process could not be launched at all.
    #[error("failed to launch '{}'", program.display())]
    Spawn {
        /// Binary that failed to start.
        program: PathBuf,
        /// Underlying launch failure.
        #[source]
        source: io::Error,
    },
}

/// Convenience alias for tarsnap adapter results.
pub type TarsnapResult<T> = Result<T, TarsnapError>;
