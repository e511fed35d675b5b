//! # stratum-types
//!
//! Shared scalar type, error type, and numerical constants
//! for the stratum adaptive penalty-layer collision engine.
//!
//! This crate has zero domain logic: it defines the vocabulary
//! that all other stratum crates share.

pub mod constants;
pub mod error;
pub mod scalar;

pub use error::{StratumError, StratumResult};
pub use scalar::Scalar;
