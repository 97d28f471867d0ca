//! Property tests: every envelope built from arbitrary fields parses back to
//! an equal value with the same identifier.

use std::sync::OnceLock;

use proptest::prelude::*;
use qc_18_proposer_envelope::{
    build, build_option, build_unsigned, parse, Block, Certificate, CertificatePolicy, Envelope,
    Id, TrustContext,
};
use shared_crypto::NodeKey;

fn identity() -> &'static (Certificate, NodeKey) {
    static IDENTITY: OnceLock<(Certificate, NodeKey)> = OnceLock::new();
    IDENTITY.get_or_init(|| {
        let certified = rcgen::generate_simple_self_signed(vec!["proposer".to_string()]).unwrap();
        let certificate = CertificatePolicy::default()
            .validate(certified.cert.der())
            .unwrap();
        let key = NodeKey::from_pkcs8(&certified.key_pair.serialize_der()).unwrap();
        (certificate, key)
    })
}

fn arb_id() -> impl Strategy<Value = Id> {
    any::<[u8; 32]>().prop_map(Id::new)
}

fn arb_inner() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_signed_roundtrip(
        parent in arb_id(),
        timestamp in any::<i64>(),
        height in any::<u64>(),
        inner in arb_inner(),
    ) {
        let (certificate, key) = identity();
        let built = build(parent, timestamp, height, certificate.clone(), inner, key).unwrap();
        let parsed = parse(built.bytes(), &CertificatePolicy::default()).unwrap();

        prop_assert_eq!(parsed.id(), built.id());
        prop_assert_eq!(parsed.bytes(), built.bytes());
        prop_assert_eq!(parsed.proposer(), certificate.node_id());
        let signed = parsed.as_signed().unwrap();
        prop_assert!(signed.verify_signature(&TrustContext::Proposer(certificate.node_id())));
        prop_assert_eq!(parsed, Envelope::Signed(built));
    }

    #[test]
    fn test_unsigned_roundtrip(
        parent in arb_id(),
        timestamp in any::<i64>(),
        height in any::<u64>(),
        inner in arb_inner(),
    ) {
        let built = build_unsigned(parent, timestamp, height, inner.clone()).unwrap();
        let parsed = parse(built.bytes(), &CertificatePolicy::default()).unwrap();

        prop_assert_eq!(parsed.parent_id(), parent);
        prop_assert_eq!(parsed.timestamp(), Some(timestamp));
        prop_assert_eq!(parsed.p_chain_height(), Some(height));
        prop_assert_eq!(parsed.inner_block(), Some(inner.as_slice()));
        prop_assert_eq!(parsed, Envelope::Unsigned(built));
    }

    #[test]
    fn test_option_roundtrip(parent in arb_id(), inner in arb_inner()) {
        let built = build_option(parent, inner).unwrap();
        let parsed = parse(built.bytes(), &CertificatePolicy::default()).unwrap();
        prop_assert_eq!(parsed, Envelope::Option(built));
    }

    #[test]
    fn test_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        // Either outcome is fine; reaching the assertion means no panic.
        let result = parse(&bytes, &CertificatePolicy::default());
        if let Ok(envelope) = result {
            prop_assert_eq!(envelope.bytes(), bytes.as_slice());
        }
    }
}
