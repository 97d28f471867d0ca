//! # Domain Layer
//!
//! Pure codec, certificate and signature logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod block;
pub mod certificate;
pub mod codec;
pub mod errors;
pub mod header;
