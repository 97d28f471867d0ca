//! # Proposer Envelope Subsystem (QC-18)
//!
//! Wraps opaque inner blocks in versioned, deterministically encoded envelopes
//! that carry timing metadata and, optionally, the identity and signature of
//! the proposing node.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): codec, envelopes, headers, certificate checks
//! - **Ports Layer** (`ports/`): `EnvelopeApi` inbound,
//!   `BlockSigner` / `CertificateValidator` outbound
//! - **Adapters Layer** (`adapters/`): X.509 validator, staking identity loader
//! - **Service Layer** (`service.rs`): wires domain logic to ports
//!
//! ## Security Notes
//!
//! - **Tag first**: the 2-byte version tag is checked before any other field
//! - **Bounded reads**: declared lengths are checked against the input before allocation
//! - **Certificate hygiene**: duplicate extensions and oversized keys are rejected
//!   before the key is used for any signature operation
//! - **Parse is not verify**: a parsed signed envelope has a valid certificate but an
//!   unchecked signature; call `verify_signature` or `Envelope::verify`
//!
//! ## Example
//!
//! ```rust
//! use qc_18_proposer_envelope::{Block, EnvelopeApi, EnvelopeService, Id};
//!
//! let service = EnvelopeService::with_default_policy();
//! let block = service
//!     .build_unsigned(Id::new([1; 32]), 1_700_000_000, 42, vec![0xCA, 0xFE])
//!     .unwrap();
//!
//! let parsed = service.parse(block.bytes()).unwrap();
//! assert_eq!(parsed.id(), block.id());
//! assert_eq!(parsed.p_chain_height(), Some(42));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export public API
pub use adapters::{StakingIdentity, X509CertificateValidator};
pub use config::{CertificateConfig, ConfigError, EnvelopeConfig, StakingConfig};
pub use domain::block::{
    build, build_option, build_unsigned, parse, Block, Envelope, OptionBlock, SignedBlock,
    TimedBlock, TrustContext, UnsignedBlock,
};
pub use domain::certificate::{
    Certificate, CertificatePolicy, DEFAULT_MAX_CERTIFICATE_LEN, DEFAULT_MAX_PUBLIC_KEY_BITS,
};
pub use domain::codec::{Tag, LENGTH_PREFIX_LEN, TAG_LEN};
pub use domain::errors::{EnvelopeError, Result};
pub use domain::header::{build_header, parse_header, Header, HEADER_LEN};
pub use ports::inbound::EnvelopeApi;
pub use ports::outbound::{BlockSigner, CertificateValidator};
pub use service::EnvelopeService;
pub use shared_types::{Id, NodeId};
