//! # Ports Layer
//!
//! Hexagonal architecture port definitions.

pub mod inbound;
pub mod outbound;

pub use inbound::EnvelopeApi;
pub use outbound::{BlockSigner, CertificateValidator};
