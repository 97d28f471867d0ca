//! # Integration Tests
//!
//! Cross-crate flows for the proposer envelope subsystem.

pub mod concurrency;
pub mod flows;
