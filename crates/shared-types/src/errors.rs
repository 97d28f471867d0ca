//! # Error Types
//!
//! Conversion errors for the shared identifier types.

use thiserror::Error;

/// Errors raised when building an identifier from untyped input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Input slice is not exactly 32 bytes.
    #[error("Invalid id length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required length in bytes.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// Input string is not valid hex.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}
