//! Runner errors

use thiserror::Error;

/// Errors raised while resolving or benchmarking operations.
///
/// Every variant is fatal for the suite being run: the driver stops at the
/// first error and does not report the remaining operations.
#[derive(Debug, Error)]
pub enum BenchError {
    /// No operation with this name is registered in the suite
    #[error("unknown operation '{name}' in suite '{suite}'")]
    UnknownOperation {
        /// Suite that was searched
        suite: String,
        /// Name that failed to resolve
        name: String,
    },

    /// No suite with this id is registered
    #[error("unknown suite '{0}'")]
    UnknownSuite(String),

    /// The operation's result did not match its expectation
    #[error("check failed for '{operation}': {reason}")]
    CheckFailed {
        /// Operation name
        operation: String,
        /// What differed
        reason: String,
    },

    /// Repetition counts must be positive
    #[error("invalid repetition count {0} (must be at least 1)")]
    InvalidRepetitions(u64),

    /// Writing a report line failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for runner operations
pub type Result<T> = std::result::Result<T, BenchError>;
