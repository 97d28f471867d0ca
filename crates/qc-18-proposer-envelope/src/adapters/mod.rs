//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports.

pub mod staking;
pub mod x509;

pub use staking::StakingIdentity;
pub use x509::X509CertificateValidator;
