//! Layer configuration.
//!
//! Base parameters from which every penalty layer's stiffness, margin and
//! timestep are derived, plus the outer horizon and iteration cap.

use serde::{Deserialize, Serialize};
use stratum_types::constants::{
    DEFAULT_BASE_DT, DEFAULT_BASE_STIFFNESS, DEFAULT_HORIZON, DEFAULT_INNER_ETA,
    DEFAULT_MAX_OUTER_ITERATIONS, DEFAULT_OUTER_ETA, LAYER_DT_FUDGE,
};
use stratum_types::{Scalar, StratumError, StratumResult};

/// Configuration for the active-layer scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// Margin of the first layer; also the broad phase margin.
    pub outer_eta: Scalar,

    /// Margin that deep layers approach but never reach.
    pub inner_eta: Scalar,

    /// Timestep of the first layer (seconds).
    pub base_dt: Scalar,

    /// Stiffness of the first layer.
    pub base_stiffness: Scalar,

    /// Outer step horizon (seconds). Every outer iteration integrates
    /// from 0 up to this time.
    pub horizon: Scalar,

    /// Coefficient of restitution (0.0 = fully damped, 1.0 = elastic).
    pub restitution: Scalar,

    /// Outer iterations allowed per step before giving up.
    pub max_outer_iterations: u32,

    /// Narrow phase distance tolerance, relative to each stencil's margin.
    pub ccd_tolerance: Scalar,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            outer_eta: DEFAULT_OUTER_ETA,
            inner_eta: DEFAULT_INNER_ETA,
            base_dt: DEFAULT_BASE_DT,
            base_stiffness: DEFAULT_BASE_STIFFNESS,
            horizon: DEFAULT_HORIZON,
            restitution: 0.0,
            max_outer_iterations: DEFAULT_MAX_OUTER_ITERATIONS,
            ccd_tolerance: 1.0e-3,
        }
    }
}

impl LayerConfig {
    /// Creates a config for debugging (few outer iterations, loose CCD).
    pub fn debug() -> Self {
        Self {
            max_outer_iterations: 8,
            ccd_tolerance: 1.0e-2,
            ..Default::default()
        }
    }

    /// Creates a high-quality config (finer layer clocks, tight CCD).
    pub fn high_quality() -> Self {
        Self {
            base_dt: DEFAULT_BASE_DT / 4.0,
            max_outer_iterations: 256,
            ccd_tolerance: 1.0e-5,
            ..Default::default()
        }
    }

    /// Stiffness of layer `depth`: `base_stiffness * depth³`.
    pub fn layer_stiffness(&self, depth: u32) -> Scalar {
        let d = Scalar::from(depth);
        self.base_stiffness * d * d * d
    }

    /// Margin of layer `depth`, decreasing towards `inner_eta`.
    pub fn layer_margin(&self, depth: u32) -> Scalar {
        self.inner_eta + (self.outer_eta - self.inner_eta) / Scalar::from(depth)
    }

    /// Timestep of layer `depth`: `base_dt / (depth * sqrt(depth + fudge))`.
    pub fn layer_dt(&self, depth: u32) -> Scalar {
        let d = Scalar::from(depth);
        self.base_dt / d / (d + LAYER_DT_FUDGE).sqrt()
    }

    /// Parses a TOML document and validates the result. Missing keys take
    /// their defaults.
    pub fn from_toml_str(text: &str) -> StratumResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| StratumError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects non-finite or out-of-range parameters.
    pub fn validate(&self) -> StratumResult<()> {
        let positive = [
            ("outer_eta", self.outer_eta),
            ("inner_eta", self.inner_eta),
            ("base_dt", self.base_dt),
            ("base_stiffness", self.base_stiffness),
            ("horizon", self.horizon),
            ("ccd_tolerance", self.ccd_tolerance),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(StratumError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if self.inner_eta >= self.outer_eta {
            return Err(StratumError::InvalidConfig(format!(
                "inner_eta ({}) must be smaller than outer_eta ({})",
                self.inner_eta, self.outer_eta
            )));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(StratumError::InvalidConfig(format!(
                "restitution must lie in [0, 1], got {}",
                self.restitution
            )));
        }
        if self.ccd_tolerance >= 1.0 {
            return Err(StratumError::InvalidConfig(format!(
                "ccd_tolerance must be below 1, got {}",
                self.ccd_tolerance
            )));
        }
        if self.max_outer_iterations == 0 {
            return Err(StratumError::InvalidConfig(
                "max_outer_iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
