//! Scalar type alias for the collision engine.
//!
//! Continuous collision queries and penalty layers with margins many
//! orders of magnitude below the scene scale need double precision.

/// The floating-point type used throughout the engine.
pub type Scalar = f64;
