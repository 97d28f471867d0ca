//! # Quantum-Chain Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion bodies, driven from benches/
//! │   └── qc_18_envelope.rs
//! │
//! └── integration/      # Cross-crate flows
//!     ├── flows.rs      # Proposer config → build → peer parse → verify
//!     └── concurrency.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-tests
//!
//! # By category
//! cargo test -p qc-tests integration::
//!
//! # Benchmarks
//! cargo bench -p qc-tests
//! ```

pub mod benchmarks;
pub mod integration;

use qc_18_proposer_envelope::Certificate;
use qc_18_proposer_envelope::CertificatePolicy;
use shared_crypto::NodeKey;

/// Self-signed proposer identity as raw DER: (certificate, PKCS#8 key).
pub fn generate_staking_der(name: &str) -> (Vec<u8>, Vec<u8>) {
    let certified = rcgen::generate_simple_self_signed(vec![name.to_string()])
        .expect("self-signed certificate");
    (
        certified.cert.der().to_vec(),
        certified.key_pair.serialize_der(),
    )
}

/// Self-signed proposer identity, validated and loaded.
pub fn generate_staking_identity(name: &str) -> (Certificate, NodeKey) {
    let (certificate_der, key_der) = generate_staking_der(name);
    let certificate = CertificatePolicy::default()
        .validate(&certificate_der)
        .expect("generated certificate passes the default policy");
    let key = NodeKey::from_pkcs8(&key_der).expect("P-256 PKCS#8");
    (certificate, key)
}

/// Install a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
