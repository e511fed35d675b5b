//! Error types for the stratum engine.
//!
//! All crates return `StratumResult<T>` from fallible operations.

use thiserror::Error;

use crate::Scalar;

/// Unified error type for the stratum engine.
#[derive(Debug, Error)]
pub enum StratumError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Simulation state does not match the mesh or is malformed.
    #[error("Invalid simulation state: {0}")]
    InvalidState(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A config, mesh or scenario file could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A freshly registered penalty force fired before the earliest
    /// collision time confirmed by the previous outer iteration.
    #[error("Causality violation: force fired at t={fire_time:.6e} before confirmed earliest collision t={earliest:.6e}")]
    CausalityViolation { fire_time: Scalar, earliest: Scalar },

    /// The earliest confirmed collision time moved backwards.
    #[error("Earliest collision time regressed: t={new_time:.6e} is earlier than t={previous:.6e}")]
    EarliestTimeRegression { new_time: Scalar, previous: Scalar },

    /// Outer iterations were exhausted with collisions still present.
    #[error("Collision resolution did not converge after {iterations} outer iterations")]
    NotConverged { iterations: u32 },
}

impl StratumError {
    /// Returns true for invariant violations that indicate a scheduler bug
    /// and must abort the run rather than be retried.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::CausalityViolation { .. } | Self::EarliestTimeRegression { .. }
        )
    }
}

/// Convenience alias for `Result<T, StratumError>`.
pub type StratumResult<T> = Result<T, StratumError>;
