//! Error types for retention policy validation.

use thiserror::Error;

/// Structured errors emitted while validating a retention policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A required field was left empty.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },
    /// A field contained an out-of-range value.
    #[error("invalid value for '{field}': {message}")]
    InvalidField {
        /// Field that failed validation.
        field: &'static str,
        /// Human-readable error description.
        message: String,
    },
}

/// Convenience alias for policy validation results.
pub type PolicyResult<T> = Result<T, PolicyError>;
