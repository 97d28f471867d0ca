//! # Outbound Ports (Driven Ports / SPI)
//!
//! Capabilities this subsystem needs but does not own: the proposer's signing
//! key and the certificate parser.

use std::sync::Arc;

use shared_crypto::{CryptoError, NodeKey};

use crate::domain::certificate::{Certificate, CertificatePolicy};
use crate::domain::errors::EnvelopeError;

/// Signing capability used by [`build`](crate::domain::block::build).
///
/// Supplied by node identity management. Implementations must be safe to call
/// from several builders at once.
pub trait BlockSigner: Send + Sync {
    /// Sign `message` with the proposer key.
    ///
    /// # Errors
    /// Any error is surfaced to the caller as `EnvelopeError::SigningFailed`.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

impl BlockSigner for NodeKey {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        NodeKey::sign(self, message)
    }
}

impl<T: BlockSigner + ?Sized> BlockSigner for Arc<T> {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        (**self).sign(message)
    }
}

/// Certificate parsing capability used while parsing signed envelopes.
pub trait CertificateValidator: Send + Sync {
    /// Parse DER bytes into a validated certificate.
    ///
    /// # Errors
    /// * `InvalidCertificate` - malformed or ambiguous certificate
    /// * `InvalidPublicKey` - unusable or oversized key
    fn parse_and_validate(&self, der: &[u8]) -> Result<Certificate, EnvelopeError>;
}

impl CertificateValidator for CertificatePolicy {
    fn parse_and_validate(&self, der: &[u8]) -> Result<Certificate, EnvelopeError> {
        self.validate(der)
    }
}
