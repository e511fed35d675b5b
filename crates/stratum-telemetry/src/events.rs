//! Simulation event types.
//!
//! Structured events emitted while resolving each step. Events are
//! lightweight value types that carry just enough data to be useful for
//! monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the engine.
///
/// Events are tagged with a step index and carry domain-specific data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Step number (0-indexed).
    pub step: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Step started.
    StepBegin {
        /// Outer horizon of the step window (seconds).
        horizon: f64,
        /// Layers carried over from earlier steps.
        deepest_layer: u32,
    },

    /// One outer iteration finished.
    OuterIteration {
        /// Iteration number within the step.
        iteration: u32,
        /// No collision survived.
        converged: bool,
        vf_collisions: u32,
        ee_collisions: u32,
        /// Earliest confirmed collision time (horizon when none).
        earliest_time: f64,
        /// Layer firings processed.
        events: u64,
        /// Deepest layer after escalation.
        deepest_layer: u32,
    },

    /// Colliding stencils were pushed into deeper layers.
    Escalation {
        /// Number of stencils escalated.
        stencils: u32,
        /// Deepest layer afterwards.
        deepest_layer: u32,
    },

    /// Energy snapshot at the end of a step.
    Energy {
        /// Kinetic energy (0.5 * m * v^2).
        kinetic: f64,
    },

    /// Step completed.
    StepEnd {
        /// Outer iterations used.
        outer_iterations: u32,
        /// Wall-clock time for the entire step (seconds).
        wall_time: f64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given step.
    pub fn new(step: u32, kind: EventKind) -> Self {
        Self { step, kind }
    }

    /// Short name of the payload variant.
    pub fn label(&self) -> &str {
        match &self.kind {
            EventKind::StepBegin { .. } => "step_begin",
            EventKind::OuterIteration { .. } => "outer_iteration",
            EventKind::Escalation { .. } => "escalation",
            EventKind::Energy { .. } => "energy",
            EventKind::StepEnd { .. } => "step_end",
            EventKind::Custom { label, .. } => label,
        }
    }
}
