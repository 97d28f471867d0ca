//! # QC-18 Proposer Envelope Benchmarks
//!
//! Hot paths on block propagation:
//! - Parse of a signed envelope (certificate validation included)
//! - Signature verification against the embedded certificate
//! - Build of signed and unsigned envelopes across inner block sizes

use std::time::Duration;

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use qc_18_proposer_envelope::{
    build, build_unsigned, parse, Block, CertificatePolicy, Id, TrustContext,
};

use crate::generate_staking_identity;

const INNER_SIZES: [usize; 4] = [0, 1024, 64 * 1024, 1024 * 1024];

pub fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18/build");
    group.measurement_time(Duration::from_secs(5));
    let (certificate, key) = generate_staking_identity("bench.local");

    for size in INNER_SIZES {
        let inner = vec![0xAB; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("signed", size), &inner, |b, inner| {
            b.iter(|| {
                black_box(
                    build(Id::EMPTY, 1, 1, certificate.clone(), inner.clone(), &key).unwrap(),
                )
            })
        });

        group.bench_with_input(BenchmarkId::new("unsigned", size), &inner, |b, inner| {
            b.iter(|| {
                let block = build_unsigned(Id::EMPTY, 1, 1, inner.clone()).unwrap();
                black_box(block)
            })
        });
    }

    group.finish();
}

pub fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18/parse");
    let (certificate, key) = generate_staking_identity("bench.local");
    let policy = CertificatePolicy::default();

    for size in INNER_SIZES {
        let block = build(Id::EMPTY, 1, 1, certificate.clone(), vec![0xCD; size], &key).unwrap();
        group.throughput(Throughput::Bytes(block.bytes().len() as u64));

        group.bench_with_input(BenchmarkId::new("signed", size), block.bytes(), |b, bytes| {
            b.iter(|| black_box(parse(bytes, &policy).unwrap()))
        });
    }

    group.bench_function("unknown_tag", |b| {
        b.iter(|| black_box(parse(&[0, 1, 2, 3, 4, 5], &policy).is_err()))
    });

    group.finish();
}

pub fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18/verify");
    let (certificate, key) = generate_staking_identity("bench.local");
    let block = build(Id::EMPTY, 1, 1, certificate.clone(), vec![0xEF; 4096], &key).unwrap();

    let embedded = TrustContext::EmbeddedCertificate;
    group.bench_function("embedded_certificate", |b| {
        b.iter(|| black_box(block.verify_signature(&embedded)))
    });

    let proposer = TrustContext::Proposer(certificate.node_id());
    group.bench_function("expected_proposer", |b| {
        b.iter(|| black_box(block.verify_signature(&proposer)))
    });

    group.finish();
}
