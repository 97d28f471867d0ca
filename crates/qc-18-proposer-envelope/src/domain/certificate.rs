//! # Staking Certificate Validation
//!
//! Pure validation of the DER certificate embedded in signed envelopes.
//!
//! ## Security Notes
//!
//! - **Single structure**: exactly one DER certificate, no trailing bytes
//! - **No duplicate extensions**: a repeated extension OID makes the meaning of
//!   the certificate parser-dependent, so it is rejected outright
//! - **Key size guard**: the public key size is read from the encoding and
//!   checked before any signature operation touches it, and before the DER
//!   length cap so an oversized key is always reported as such
//! - **Algorithms**: RSA and ECDSA P-256 only

use std::collections::HashSet;

use shared_crypto::{sha256, SignatureScheme, VerificationKey};
use shared_types::NodeId;
use x509_parser::prelude::{FromDer, X509Certificate};
use x509_parser::public_key::PublicKey;

use super::errors::{EnvelopeError, Result};

/// Default upper bound on the public key size, in bits.
pub const DEFAULT_MAX_PUBLIC_KEY_BITS: usize = 8192;

/// Default upper bound on the DER certificate length, in bytes.
pub const DEFAULT_MAX_CERTIFICATE_LEN: usize = 16 * 1024;

/// Uncompressed SEC1 P-256 point: 0x04 || x(32) || y(32).
const P256_POINT_LEN: usize = 65;

/// Key size reported for P-256 certificates.
const P256_KEY_BITS: usize = 256;

/// A validated staking certificate.
///
/// Only constructed through [`CertificatePolicy::validate`], so holding one
/// means the DER bytes passed every structural and key-size check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Certificate {
    raw: Vec<u8>,
    public_key: VerificationKey,
    public_key_bits: usize,
}

impl Certificate {
    /// Original DER bytes.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Key used to verify the holder's signatures.
    pub fn public_key(&self) -> &VerificationKey {
        &self.public_key
    }

    /// Size of the public key in bits (RSA modulus length or curve size).
    pub fn public_key_bits(&self) -> usize {
        self.public_key_bits
    }

    /// Node identity of the certificate holder.
    pub fn node_id(&self) -> NodeId {
        NodeId::new(sha256(&self.raw))
    }
}

/// Limits applied when accepting a certificate from the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CertificatePolicy {
    /// Largest accepted public key, in bits.
    pub max_public_key_bits: usize,
    /// Largest accepted DER encoding, in bytes.
    pub max_certificate_len: usize,
}

impl Default for CertificatePolicy {
    fn default() -> Self {
        Self {
            max_public_key_bits: DEFAULT_MAX_PUBLIC_KEY_BITS,
            max_certificate_len: DEFAULT_MAX_CERTIFICATE_LEN,
        }
    }
}

impl CertificatePolicy {
    /// Parse and validate a DER certificate.
    ///
    /// # Errors
    /// * `InvalidCertificate` - not exactly one well-formed certificate, a
    ///   duplicated extension, or an unsupported key algorithm
    /// * `InvalidPublicKey` - malformed key or key larger than the policy allows
    pub fn validate(&self, der: &[u8]) -> Result<Certificate> {
        let (rest, cert) = X509Certificate::from_der(der)
            .map_err(|e| EnvelopeError::InvalidCertificate(e.to_string()))?;
        if !rest.is_empty() {
            return Err(EnvelopeError::InvalidCertificate(format!(
                "{} bytes after certificate",
                rest.len()
            )));
        }

        check_unique_extensions(&cert)?;

        // Key size is checked ahead of the DER length cap.
        let (public_key, public_key_bits) = self.extract_public_key(&cert)?;

        if der.len() > self.max_certificate_len {
            return Err(EnvelopeError::InvalidCertificate(format!(
                "certificate is {} bytes, limit is {}",
                der.len(),
                self.max_certificate_len
            )));
        }

        Ok(Certificate {
            raw: der.to_vec(),
            public_key,
            public_key_bits,
        })
    }

    fn extract_public_key(&self, cert: &X509Certificate<'_>) -> Result<(VerificationKey, usize)> {
        let spki = cert.public_key();
        let encoded_key: &[u8] = &spki.subject_public_key.data;
        let parsed = spki
            .parsed()
            .map_err(|e| EnvelopeError::InvalidPublicKey(e.to_string()))?;

        let (scheme, bits, key): (SignatureScheme, usize, &[u8]) = match parsed {
            PublicKey::RSA(rsa) => (
                SignatureScheme::RsaPkcs1Sha256,
                modulus_bits(rsa.modulus),
                encoded_key,
            ),
            PublicKey::EC(_) => {
                if encoded_key.len() != P256_POINT_LEN || encoded_key[0] != 0x04 {
                    return Err(EnvelopeError::InvalidCertificate(format!(
                        "unsupported EC point encoding ({} bytes)",
                        encoded_key.len()
                    )));
                }
                (SignatureScheme::EcdsaP256Sha256, P256_KEY_BITS, encoded_key)
            }
            _ => {
                return Err(EnvelopeError::InvalidCertificate(format!(
                    "unsupported public key algorithm {}",
                    spki.algorithm.algorithm.to_id_string()
                )))
            }
        };

        if bits > self.max_public_key_bits {
            return Err(EnvelopeError::InvalidPublicKey(format!(
                "{bits}-bit key exceeds the {}-bit limit",
                self.max_public_key_bits
            )));
        }

        Ok((VerificationKey::new(scheme, key.to_vec()), bits))
    }
}

fn check_unique_extensions(cert: &X509Certificate<'_>) -> Result<()> {
    let mut seen = HashSet::new();
    for ext in cert.extensions() {
        if !seen.insert(&ext.oid) {
            return Err(EnvelopeError::InvalidCertificate(format!(
                "duplicate extension {}",
                ext.oid.to_id_string()
            )));
        }
    }
    Ok(())
}

/// Bit length of a big-endian unsigned modulus, ignoring leading zero bytes.
fn modulus_bits(modulus: &[u8]) -> usize {
    match modulus.iter().position(|b| *b != 0) {
        Some(first) => {
            let significant = &modulus[first..];
            significant.len() * 8 - significant[0].leading_zeros() as usize
        }
        None => 0,
    }
}
