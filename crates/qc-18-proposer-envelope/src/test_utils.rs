//! Test utilities for the envelope subsystem.
//!
//! Deterministic signers and throwaway staking identities.
//! Enable with the `test-utils` feature flag.

use shared_crypto::{CryptoError, NodeKey};

use crate::domain::certificate::{Certificate, CertificatePolicy};
use crate::ports::outbound::BlockSigner;

/// A signer that never touches real key material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeSigner {
    /// Always returns the same signature bytes.
    Fixed(Vec<u8>),
    /// Always fails, as an unavailable key store would.
    Failing,
}

impl FakeSigner {
    /// Signer returning `signature` for every message.
    pub fn fixed(signature: Vec<u8>) -> Self {
        Self::Fixed(signature)
    }

    /// Signer that always fails.
    pub fn failing() -> Self {
        Self::Failing
    }
}

impl BlockSigner for FakeSigner {
    fn sign(&self, _message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::Fixed(signature) => Ok(signature.clone()),
            Self::Failing => Err(CryptoError::SigningFailed),
        }
    }
}

/// Fresh self-signed ECDSA P-256 certificate with its matching key.
///
/// # Panics
///
/// Panics if certificate generation fails; only meant for tests.
pub fn staking_identity() -> (Certificate, NodeKey) {
    let certified = rcgen::generate_simple_self_signed(vec!["node.local".to_string()])
        .expect("self-signed certificate");
    let certificate = CertificatePolicy::default()
        .validate(certified.cert.der())
        .expect("generated certificate passes the default policy");
    let key = NodeKey::from_pkcs8(&certified.key_pair.serialize_der()).expect("P-256 PKCS#8");
    (certificate, key)
}
