//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use shared_types::Id;

use crate::domain::block::{Envelope, OptionBlock, SignedBlock, TrustContext, UnsignedBlock};
use crate::domain::certificate::Certificate;
use crate::domain::errors::Result;
use crate::domain::header::Header;
use crate::ports::outbound::BlockSigner;

/// Primary envelope API.
///
/// Consumed by block production (build) and block propagation (parse).
/// Implementations must be thread-safe (`Send + Sync`).
pub trait EnvelopeApi: Send + Sync {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Build a proposer-signed envelope.
    ///
    /// # Errors
    /// * `SigningFailed` - the signer could not produce a signature
    fn build(
        &self,
        parent_id: Id,
        timestamp: i64,
        p_chain_height: u64,
        certificate: Certificate,
        inner: Vec<u8>,
        signer: &dyn BlockSigner,
    ) -> Result<SignedBlock>;

    /// Validate raw certificate DER, then build a proposer-signed envelope.
    ///
    /// # Errors
    /// * `InvalidCertificate` / `InvalidPublicKey` - the DER is rejected
    /// * `SigningFailed` - the signer could not produce a signature
    fn build_with_der(
        &self,
        parent_id: Id,
        timestamp: i64,
        p_chain_height: u64,
        certificate_der: &[u8],
        inner: Vec<u8>,
        signer: &dyn BlockSigner,
    ) -> Result<SignedBlock>;

    /// Build an envelope without proposer.
    fn build_unsigned(
        &self,
        parent_id: Id,
        timestamp: i64,
        p_chain_height: u64,
        inner: Vec<u8>,
    ) -> Result<UnsignedBlock>;

    /// Build a minimal option envelope.
    fn build_option(&self, parent_id: Id, inner: Vec<u8>) -> Result<OptionBlock>;

    /// Build a detached header.
    fn build_header(&self, chain_id: Id, parent_id: Id, body_id: Id) -> Header;

    // =========================================================================
    // Parsing & Verification
    // =========================================================================

    /// Parse untrusted bytes into an envelope or header.
    fn parse(&self, bytes: &[u8]) -> Result<Envelope>;

    /// Parse untrusted bytes that must be a detached header.
    fn parse_header(&self, bytes: &[u8]) -> Result<Header>;

    /// Check a signed envelope's signature against `trust`.
    fn verify_signature(&self, block: &SignedBlock, trust: &TrustContext) -> bool;
}
