//! # Error Types
//!
//! Custom error types for npad using `thiserror`.

use thiserror::Error;

/// Main error type for npad
#[derive(Debug, Error)]
pub enum NpadError {
    /// The native pad library reports a snapshot layout of a different
    /// size than this crate was written against. Continuing would read
    /// garbage memory, so construction aborts and must not be retried.
    #[error("pad state ABI mismatch: native layer reports {actual} bytes, expected {expected}")]
    ConfigurationMismatch {
        /// Size of the snapshot layout this crate was compiled with
        expected: usize,
        /// Size reported by the bound native library
        actual: usize,
    },

    /// A precondition on caller-supplied arguments was violated
    /// (empty id set, unknown id or style name, out-of-range value).
    /// Rejected before any native call is made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Malformed input trace records
    #[error("Trace error: {0}")]
    Trace(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for npad
pub type Result<T> = std::result::Result<T, NpadError>;
