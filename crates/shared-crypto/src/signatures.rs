//! # Proposer Signatures
//!
//! Block proposers sign with the key bound to their staking certificate.
//! Two schemes are supported, matching what X.509 staking certificates carry:
//!
//! - RSA PKCS#1 v1.5 with SHA-256
//! - ECDSA P-256 with SHA-256 (ASN.1 DER signatures)
//!
//! ## Use Cases
//!
//! - `NodeKey`: the local signing capability handed to block builders
//! - `VerificationKey`: the public half extracted from a peer's certificate

use std::fmt;

use ring::rand::SystemRandom;
use ring::signature::{
    EcdsaKeyPair, KeyPair, RsaKeyPair, UnparsedPublicKey, ECDSA_P256_SHA256_ASN1,
    ECDSA_P256_SHA256_ASN1_SIGNING, RSA_PKCS1_2048_8192_SHA256, RSA_PKCS1_SHA256,
};

use crate::CryptoError;

/// Signature algorithm bound to a proposer key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    /// RSA PKCS#1 v1.5 over SHA-256.
    RsaPkcs1Sha256,
    /// ECDSA on NIST P-256 over SHA-256, DER-encoded signature.
    EcdsaP256Sha256,
}

/// Public key used to check proposer signatures.
///
/// For RSA the bytes are the DER `RSAPublicKey`; for ECDSA they are the
/// uncompressed SEC1 point. Both are exactly the contents of the certificate's
/// `subjectPublicKey` bit string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VerificationKey {
    scheme: SignatureScheme,
    key: Vec<u8>,
}

impl VerificationKey {
    /// Create a key for the given scheme.
    pub fn new(scheme: SignatureScheme, key: Vec<u8>) -> Self {
        Self { scheme, key }
    }

    /// Signature scheme of this key.
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Raw public key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    /// Verify `signature` over `message`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        let result = match self.scheme {
            SignatureScheme::RsaPkcs1Sha256 => {
                UnparsedPublicKey::new(&RSA_PKCS1_2048_8192_SHA256, &self.key)
                    .verify(message, signature)
            }
            SignatureScheme::EcdsaP256Sha256 => {
                UnparsedPublicKey::new(&ECDSA_P256_SHA256_ASN1, &self.key)
                    .verify(message, signature)
            }
        };
        result.map_err(|_| CryptoError::SignatureVerificationFailed)
    }

    /// Boolean form of [`VerificationKey::verify`].
    pub fn is_valid(&self, message: &[u8], signature: &[u8]) -> bool {
        self.verify(message, signature).is_ok()
    }
}

impl fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationKey")
            .field("scheme", &self.scheme)
            .field("len", &self.key.len())
            .finish()
    }
}

enum KeyPairInner {
    Ecdsa(EcdsaKeyPair),
    Rsa(RsaKeyPair),
}

/// Local proposer signing key.
///
/// Safe to share between threads; `ring` key pairs are immutable and the
/// system RNG is stateless.
pub struct NodeKey {
    inner: KeyPairInner,
    rng: SystemRandom,
}

impl NodeKey {
    /// Load a PKCS#8 DER private key.
    ///
    /// ECDSA P-256 is tried first, then RSA.
    pub fn from_pkcs8(pkcs8: &[u8]) -> Result<Self, CryptoError> {
        let rng = SystemRandom::new();

        if let Ok(pair) = EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, pkcs8, &rng) {
            return Ok(Self {
                inner: KeyPairInner::Ecdsa(pair),
                rng,
            });
        }

        let pair = RsaKeyPair::from_pkcs8(pkcs8)
            .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self {
            inner: KeyPairInner::Rsa(pair),
            rng,
        })
    }

    /// Generate a fresh ECDSA P-256 key.
    ///
    /// Returns the key together with its PKCS#8 encoding so callers can persist it.
    pub fn generate_ecdsa_p256() -> Result<(Self, Vec<u8>), CryptoError> {
        let rng = SystemRandom::new();
        let document = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &rng)
            .map_err(|_| CryptoError::KeyGenerationFailed("P-256".into()))?;
        let pkcs8 = document.as_ref().to_vec();
        let key = Self::from_pkcs8(&pkcs8)?;
        Ok((key, pkcs8))
    }

    /// Signature scheme of this key.
    pub fn scheme(&self) -> SignatureScheme {
        match self.inner {
            KeyPairInner::Ecdsa(_) => SignatureScheme::EcdsaP256Sha256,
            KeyPairInner::Rsa(_) => SignatureScheme::RsaPkcs1Sha256,
        }
    }

    /// Public half of this key.
    pub fn verification_key(&self) -> VerificationKey {
        let key = match &self.inner {
            KeyPairInner::Ecdsa(pair) => pair.public_key().as_ref().to_vec(),
            KeyPairInner::Rsa(pair) => pair.public_key().as_ref().to_vec(),
        };
        VerificationKey::new(self.scheme(), key)
    }

    /// Sign `message`. SHA-256 is applied internally.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match &self.inner {
            KeyPairInner::Ecdsa(pair) => pair
                .sign(&self.rng, message)
                .map(|sig| sig.as_ref().to_vec())
                .map_err(|_| CryptoError::SigningFailed),
            KeyPairInner::Rsa(pair) => {
                let mut signature = vec![0u8; pair.public().modulus_len()];
                pair.sign(&RSA_PKCS1_SHA256, &self.rng, message, &mut signature)
                    .map_err(|_| CryptoError::SigningFailed)?;
                Ok(signature)
            }
        }
    }
}

impl fmt::Debug for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeKey")
            .field("scheme", &self.scheme())
            .finish_non_exhaustive()
    }
}
