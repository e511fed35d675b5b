//! Numerical constants and engine defaults.

use crate::Scalar;

/// Number of depth levels a colliding stencil gains per escalation.
pub const LAYERS_PER_ESCALATION: u32 = 5;

/// Perturbation added under the square root of the layer timestep
/// formula so that no two layers fire at exactly the same instant.
pub const LAYER_DT_FUDGE: Scalar = 1.0e-4;

/// Default outer contact thickness (meters).
pub const DEFAULT_OUTER_ETA: Scalar = 1.0e-3;

/// Default inner contact thickness (meters). Deep layers approach this.
pub const DEFAULT_INNER_ETA: Scalar = 1.0e-4;

/// Default timestep of the first penalty layer (seconds).
pub const DEFAULT_BASE_DT: Scalar = 1.0e-3;

/// Default stiffness of the first penalty layer.
pub const DEFAULT_BASE_STIFFNESS: Scalar = 100.0;

/// Default outer step horizon (seconds).
pub const DEFAULT_HORIZON: Scalar = 1.0 / 60.0;

/// Default cap on outer iterations per step.
pub const DEFAULT_MAX_OUTER_ITERATIONS: u32 = 64;

/// Epsilon for floating-point comparisons.
pub const EPSILON: Scalar = 1.0e-12;
