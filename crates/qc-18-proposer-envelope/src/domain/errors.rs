//! # Envelope Errors
//!
//! Error types for envelope construction, parsing and verification.

use thiserror::Error;

/// Result type alias for envelope operations
pub type Result<T> = std::result::Result<T, EnvelopeError>;

/// Errors that can occur while building, parsing or verifying envelopes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Leading tag does not name a known envelope or header layout
    #[error("Unknown version tag: {0:#06x}")]
    UnknownVersion(u16),

    /// Fewer bytes remain than a field requires
    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes the next field requires
        needed: usize,
        /// Bytes left in the input
        remaining: usize,
    },

    /// Bytes remain after a complete structure was decoded
    #[error("Trailing bytes after envelope: {0}")]
    TrailingBytes(usize),

    /// Certificate is malformed or structurally ambiguous
    #[error("Invalid certificate: {0}")]
    InvalidCertificate(String),

    /// Certificate public key is unusable or exceeds the size guard
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Signature does not verify against the trust context
    #[error("Invalid signature")]
    InvalidSignature,

    /// Local signing capability could not produce a signature
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// A field could not be serialized
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Envelope is signed but the caller expected an unsigned one
    #[error("Unexpected proposer: envelope is signed")]
    UnexpectedProposer,

    /// Envelope is unsigned but the caller expected a proposer signature
    #[error("Missing proposer: envelope is unsigned")]
    MissingProposer,
}

impl EnvelopeError {
    /// Whether the error was caused by untrusted input (the sender may be penalized).
    pub fn is_malformed_input(&self) -> bool {
        !self.is_local()
    }

    /// Whether the error indicates local misconfiguration rather than bad input.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::SigningFailed(_) | Self::EncodingFailed(_))
    }
}
