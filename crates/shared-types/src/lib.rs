//! # Shared Types Crate
//!
//! Identifier types used across the proposer envelope subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Id` and `NodeId` are defined once here.
//! - **Fixed Width**: every identifier is exactly 32 bytes; conversions from
//!   slices are fallible and never pad or truncate.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
