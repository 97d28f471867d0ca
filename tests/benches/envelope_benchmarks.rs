//! # Proposer Envelope Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | Parse signed envelope | < 1ms |
//! | Verify proposer signature | < 1ms |
//! | Build signed envelope (64 KiB inner) | < 1ms |

use criterion::{criterion_group, criterion_main};
use qc_tests::benchmarks::qc_18_envelope::{bench_build, bench_parse, bench_verify};

criterion_group!(envelope_benches, bench_build, bench_parse, bench_verify);
criterion_main!(envelope_benches);
