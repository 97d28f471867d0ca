//! # Shared Crypto - Proposer Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 | Envelope and header identifiers |
//! | `signatures` | RSA PKCS#1 v1.5 / ECDSA P-256 (SHA-256) | Proposer block signatures |
//!
//! ## Security Properties
//!
//! - **RSA verification** accepts moduli between 2048 and 8192 bits only
//! - **ECDSA** signatures are ASN.1 DER encoded, as produced by X.509 tooling
//! - Private key material never leaves the `ring` key pair objects

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::sha256;
pub use signatures::{NodeKey, SignatureScheme, VerificationKey};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
