//! Step resolver: repeats outer iterations until a step is collision-free.
//!
//! The scheduler alone never gives up; this driver snapshots the state,
//! restores it after every rejected iteration, and caps the number of
//! attempts.

use std::time::Instant;

use stratum_mesh::TriangleMesh;
use stratum_types::{Scalar, StratumError, StratumResult};

use crate::active_layers::{ActiveLayers, IterationReport};
use crate::state::SimulationState;

/// Result of resolving one step.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// One report per outer iteration, the last one converged.
    pub iterations: Vec<IterationReport>,
    /// Deepest layer once the step converged.
    pub deepest_layer: u32,
    /// Wall-clock time for the whole step (seconds).
    pub wall_time: f64,
    /// Kinetic energy at the horizon.
    pub kinetic_energy: Scalar,
}

impl StepReport {
    pub fn outer_iterations(&self) -> u32 {
        self.iterations.len() as u32
    }

    /// Group firings summed over all outer iterations.
    pub fn total_events(&self) -> u64 {
        self.iterations.iter().map(|r| r.events).sum()
    }
}

/// Drives [`ActiveLayers`] through whole steps.
#[derive(Debug, Clone)]
pub struct StepResolver {
    max_outer_iterations: u32,
}

impl StepResolver {
    pub fn new(max_outer_iterations: u32) -> Self {
        Self {
            max_outer_iterations,
        }
    }

    /// Resolver using the layers' configured iteration cap.
    pub fn for_layers(layers: &ActiveLayers) -> Self {
        Self::new(layers.config().max_outer_iterations)
    }

    pub fn max_outer_iterations(&self) -> u32 {
        self.max_outer_iterations
    }

    /// Advance `state` over one step window `[0, horizon]` without any
    /// surviving collision.
    ///
    /// On success `state` sits at the horizon. On
    /// [`StratumError::NotConverged`] it holds the last rejected attempt.
    pub fn resolve(
        &self,
        layers: &mut ActiveLayers,
        mesh: &TriangleMesh,
        state: &mut SimulationState,
    ) -> StratumResult<StepReport> {
        let start = Instant::now();

        state.validate_for(mesh)?;
        layers.begin_step();
        state.rebase_time(0.0);
        let snapshot = state.clone();

        let mut iterations = Vec::new();
        for attempt in 0..self.max_outer_iterations {
            if attempt > 0 {
                state.restore(&snapshot);
            }
            let report = layers.run_one_iteration(mesh, state)?;
            let converged = report.converged;
            iterations.push(report);

            if converged {
                let step = StepReport {
                    iterations,
                    deepest_layer: layers.deepest_layer(),
                    wall_time: start.elapsed().as_secs_f64(),
                    kinetic_energy: state.kinetic_energy(),
                };
                tracing::info!(
                    outer_iterations = step.outer_iterations(),
                    deepest_layer = step.deepest_layer,
                    events = step.total_events(),
                    "step converged"
                );
                return Ok(step);
            }
        }

        tracing::warn!(
            iterations = self.max_outer_iterations,
            deepest_layer = layers.deepest_layer(),
            "outer iteration cap reached with collisions remaining"
        );
        Err(StratumError::NotConverged {
            iterations: self.max_outer_iterations,
        })
    }
}
