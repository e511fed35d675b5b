//! Active layers: the event-driven penalty scheduler.
//!
//! One outer iteration integrates penalty impulses from time 0 to the
//! horizon, firing layers earliest first and advancing only the vertices
//! each layer touches. The resulting trajectory log is then checked with
//! continuous collision detection. Surviving collisions roll the layer
//! clocks back and deepen the offending stencils by
//! [`LAYERS_PER_ESCALATION`] levels; the caller restores its state and
//! repeats.
//!
//! ```text
//! start_iteration ─► step* ─► collision_detection ─► rollback ─► escalate
//! ```

use std::collections::BTreeMap;

use stratum_contact::{
    BroadPhase, CollisionSet, ConservativeAdvancement, EdgeEdgeStencil, NarrowPhase, Stencil,
    SweptBroadPhase, TrajectoryLog, VertexFaceStencil,
};
use stratum_math::{edge_edge_distance, vertex_face_distance, DVec3};
use stratum_mesh::TriangleMesh;
use stratum_types::constants::LAYERS_PER_ESCALATION;
use stratum_types::{Scalar, StratumError, StratumResult};

use crate::config::LayerConfig;
use crate::group::PenaltyGroup;
use crate::queue::EventQueue;
use crate::state::SimulationState;

/// Outcome of one outer iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationReport {
    /// Outer iteration index within the current step (0-based).
    pub iteration: u32,
    /// No collision survived at the current layer depths.
    pub converged: bool,
    pub vf_collisions: usize,
    pub ee_collisions: usize,
    /// Earliest confirmed collision time, or the horizon if none.
    pub earliest_time: Scalar,
    /// Group firings processed.
    pub events: u64,
    pub trajectory_entries: usize,
    /// Deepest layer after any escalation.
    pub deepest_layer: u32,
}

/// The active-layer scheduler.
pub struct ActiveLayers {
    config: LayerConfig,
    groups: Vec<PenaltyGroup>,
    queue: EventQueue,
    depths: BTreeMap<Stencil, u32>,
    /// Escalation counter; potentials remember the value that added them.
    generation: u32,
    /// Earliest collision time confirmed so far in this step.
    earliest_time: Scalar,
    iteration: u32,
    events: u64,
    log: Option<TrajectoryLog>,
    broad: Box<dyn BroadPhase>,
    narrow: Box<dyn NarrowPhase>,
    // Per-DOF scratch, reused across firings.
    scratch_q: Vec<Scalar>,
    scratch_v: Vec<Scalar>,
    forces: Vec<Scalar>,
}

impl ActiveLayers {
    /// Scheduler with the swept sweep-and-prune broad phase and the
    /// conservative-advancement narrow phase.
    pub fn new(config: LayerConfig) -> StratumResult<Self> {
        let narrow = ConservativeAdvancement {
            tolerance: config.ccd_tolerance,
            ..Default::default()
        };
        Self::with_phases(config, Box::new(SweptBroadPhase::new()), Box::new(narrow))
    }

    pub fn with_phases(
        config: LayerConfig,
        broad: Box<dyn BroadPhase>,
        narrow: Box<dyn NarrowPhase>,
    ) -> StratumResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            groups: Vec::new(),
            queue: EventQueue::new(),
            depths: BTreeMap::new(),
            generation: 0,
            earliest_time: 0.0,
            iteration: 0,
            events: 0,
            log: None,
            broad,
            narrow,
            scratch_q: Vec::new(),
            scratch_v: Vec::new(),
            forces: Vec::new(),
        })
    }

    // ─── Layer bookkeeping ────────────────────────────────────

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    pub fn groups(&self) -> &[PenaltyGroup] {
        &self.groups
    }

    /// Number of layers created so far.
    pub fn deepest_layer(&self) -> u32 {
        self.groups.len() as u32
    }

    /// Current depth of `stencil` (0 if never escalated).
    pub fn depth(&self, stencil: &Stencil) -> u32 {
        self.depths.get(stencil).copied().unwrap_or(0)
    }

    pub fn depths(&self) -> &BTreeMap<Stencil, u32> {
        &self.depths
    }

    /// Earliest collision time confirmed in the current step.
    pub fn earliest_time(&self) -> Scalar {
        self.earliest_time
    }

    /// Trajectory log of the current (or last) outer iteration.
    pub fn trajectory(&self) -> Option<&TrajectoryLog> {
        self.log.as_ref()
    }

    pub fn broad_phase_name(&self) -> &str {
        self.broad.name()
    }

    pub fn narrow_phase_name(&self) -> &str {
        self.narrow.name()
    }

    /// Margin of layer `depth`.
    pub fn layer_margin(&self, depth: u32) -> Scalar {
        self.config.layer_margin(depth)
    }

    /// Margin `stencil` must keep next: that of the layer below its depth.
    pub fn stencil_thickness(&self, stencil: &Stencil) -> Scalar {
        self.layer_margin(self.depth(stencil) + 1)
    }

    /// Create layers until `max_depth` exist. New layers are queued.
    pub fn add_groups(&mut self, max_depth: u32) {
        while self.deepest_layer() < max_depth {
            let depth = self.deepest_layer() + 1;
            let group = PenaltyGroup::new(
                self.config.layer_dt(depth),
                self.config.layer_margin(depth),
                self.config.inner_eta,
                self.config.layer_stiffness(depth),
                self.config.restitution,
            );
            self.queue.push(group.next_fire_time(), self.groups.len());
            self.groups.push(group);
        }
    }

    /// Deepen a vertex-face stencil by [`LAYERS_PER_ESCALATION`] levels.
    pub fn add_vf_stencil(&mut self, stencil: VertexFaceStencil) {
        self.escalate(stencil.into());
    }

    /// Deepen an edge-edge stencil by [`LAYERS_PER_ESCALATION`] levels.
    pub fn add_ee_stencil(&mut self, stencil: EdgeEdgeStencil) {
        self.escalate(stencil.into());
    }

    fn escalate(&mut self, stencil: Stencil) {
        let old = self.depth(&stencil);
        let new = old + LAYERS_PER_ESCALATION;
        self.add_groups(new);
        for group in &mut self.groups[old as usize..new as usize] {
            match stencil {
                Stencil::VertexFace(s) => group.add_vf_stencil(s, self.generation),
                Stencil::EdgeEdge(s) => group.add_ee_stencil(s, self.generation),
            }
        }
        self.depths.insert(stencil, new);
    }

    /// Reset every layer clock to zero and re-sort the queue.
    /// Depths and potentials are kept.
    pub fn rollback(&mut self) {
        for group in &mut self.groups {
            group.rollback();
        }
        let groups = &self.groups;
        self.queue.rebuild(|g| groups[g].next_fire_time());
    }

    /// Open a new step window: clear the earliest-time watermark and roll
    /// the clocks back. Depths persist across steps.
    pub fn begin_step(&mut self) {
        self.earliest_time = 0.0;
        self.iteration = 0;
        self.rollback();
    }

    // ─── Micro-integration ────────────────────────────────────

    /// Seed a fresh trajectory log from `state.q` at time 0.
    ///
    /// Every DOF must be consistent at time 0; see
    /// [`SimulationState::rebase_time`].
    pub fn start_iteration(&mut self, state: &SimulationState) -> StratumResult<()> {
        if let Some(&t) = state.last_update_time.iter().find(|&&t| t != 0.0) {
            return Err(StratumError::InvalidState(format!(
                "DOF last updated at t={t}; outer iterations start from t=0"
            )));
        }

        let dofs = state.dof_count();
        self.scratch_q.resize(dofs, 0.0);
        self.scratch_v.resize(dofs, 0.0);
        self.forces.resize(dofs, 0.0);
        self.events = 0;
        self.log = Some(TrajectoryLog::new(&state.q));
        Ok(())
    }

    /// Process one event. Returns `true` once the horizon is reached, with
    /// every DOF advanced to it and the trajectory log finalized.
    pub fn step(&mut self, state: &mut SimulationState) -> StratumResult<bool> {
        let horizon = self.config.horizon;
        let Some(log) = self.log.as_mut() else {
            return Err(StratumError::InvalidState(
                "step called before start_iteration".into(),
            ));
        };

        let (time, g) = match self.queue.peek() {
            Some((time, g)) if time < horizon => (time, g),
            _ => {
                for ((q, v), last) in state
                    .q
                    .iter_mut()
                    .zip(&state.v)
                    .zip(&mut state.last_update_time)
                {
                    *q += (horizon - *last) * v;
                    *last = horizon;
                }
                log.finalize(&state.q, horizon);
                return Ok(true);
            }
        };
        self.queue.pop();
        self.events += 1;

        let group = &self.groups[g];

        // Extrapolate the group's vertices to the firing time.
        for &vertex in group.vertices() {
            for i in 3 * vertex as usize..3 * vertex as usize + 3 {
                self.scratch_q[i] = state.q[i] + (time - state.last_update_time[i]) * state.v[i];
                self.scratch_v[i] = state.v[i];
                self.forces[i] = 0.0;
            }
        }

        let contribution = group.accumulate(
            &self.scratch_q,
            &self.scratch_v,
            &mut self.forces,
            Some(self.generation),
        );
        if contribution.fresh && time < self.earliest_time {
            tracing::error!(
                fire_time = time,
                earliest = self.earliest_time,
                layer = g + 1,
                "newly escalated layer fired before the confirmed earliest collision"
            );
            return Err(StratumError::CausalityViolation {
                fire_time: time,
                earliest: self.earliest_time,
            });
        }

        for &vertex in group.vertices() {
            let base = 3 * vertex as usize;
            let mut touched = false;
            for i in base..base + 3 {
                touched |= self.forces[i] != 0.0;
                state.v[i] += state.minv[i] * self.forces[i];
                state.q[i] = self.scratch_q[i];
                state.last_update_time[i] = time;
            }
            if touched {
                log.add_entry(vertex as usize, time, DVec3::from_slice(&state.q[base..base + 3]));
            }
        }

        let group = &mut self.groups[g];
        group.increment_time_step();
        self.queue.push(group.next_fire_time(), g);
        Ok(false)
    }

    // ─── Collision re-check ───────────────────────────────────

    /// Run broad and narrow phase over the finalized trajectory log.
    ///
    /// Candidates come from the broad phase at `outer_eta`; each is then
    /// tested against the margin of the layer below its current depth.
    pub fn collision_detection(&mut self, mesh: &TriangleMesh) -> StratumResult<CollisionSet> {
        let log = match &self.log {
            Some(log) if log.is_finalized() => log,
            _ => {
                return Err(StratumError::InvalidState(
                    "collision detection needs a finalized trajectory log".into(),
                ))
            }
        };

        let candidates = self
            .broad
            .find_candidates(log, mesh, self.config.outer_eta)?;
        tracing::trace!(
            vf = candidates.vf.len(),
            ee = candidates.ee.len(),
            "collision candidates"
        );

        let vf: Vec<(VertexFaceStencil, Scalar)> = candidates
            .vf
            .iter()
            .map(|&s| (s, self.stencil_thickness(&s.into())))
            .collect();
        let ee: Vec<(EdgeEdgeStencil, Scalar)> = candidates
            .ee
            .iter()
            .map(|&s| (s, self.stencil_thickness(&s.into())))
            .collect();

        self.narrow.find_collisions(log, &vf, &ee)
    }

    /// One full outer iteration: integrate to the horizon, detect, roll
    /// back, and escalate whatever survived.
    ///
    /// `state` is left at the horizon. When the report is not converged the
    /// caller is expected to restore `state` before iterating again.
    pub fn run_one_iteration(
        &mut self,
        mesh: &TriangleMesh,
        state: &mut SimulationState,
    ) -> StratumResult<IterationReport> {
        mesh.validate()?;
        state.validate_for(mesh)?;
        tracing::debug!(
            iteration = self.iteration,
            deepest_layer = self.deepest_layer(),
            outer_eta = ?self.groups.last().map(PenaltyGroup::outer_eta),
            dt = ?self.groups.last().map(PenaltyGroup::dt),
            "outer iteration"
        );

        self.start_iteration(state)?;
        while !self.step(state)? {}

        let trajectory_entries = self.log.as_ref().map_or(0, TrajectoryLog::entry_count);
        let collisions = self.collision_detection(mesh)?;
        let earliest = collisions.earliest_time.unwrap_or(self.config.horizon);

        if earliest < self.earliest_time {
            tracing::error!(
                new_time = earliest,
                previous = self.earliest_time,
                "earliest collision time moved backwards"
            );
            return Err(StratumError::EarliestTimeRegression {
                new_time: earliest,
                previous: self.earliest_time,
            });
        }
        self.earliest_time = earliest;

        self.rollback();

        let converged = collisions.is_empty();
        if !converged {
            tracing::warn!(
                vf = collisions.vf.len(),
                ee = collisions.ee.len(),
                earliest,
                "collisions survived, deepening layers"
            );
            self.generation += 1;
            for &s in &collisions.vf {
                self.add_vf_stencil(s);
            }
            for &s in &collisions.ee {
                self.add_ee_stencil(s);
            }
        }

        let report = IterationReport {
            iteration: self.iteration,
            converged,
            vf_collisions: collisions.vf.len(),
            ee_collisions: collisions.ee.len(),
            earliest_time: earliest,
            events: self.events,
            trajectory_entries,
            deepest_layer: self.deepest_layer(),
        };
        self.iteration += 1;
        Ok(report)
    }

    // ─── Margin sizing ────────────────────────────────────────

    /// Conservative bound on the distance between any two non-adjacent
    /// primitives at configuration `q`.
    ///
    /// Starts from the smallest vertex to non-incident face corner
    /// distance, then tightens it with exact vertex-face and edge-edge
    /// distances over the broad phase candidates within that bound.
    pub fn closest_distance(&mut self, q: &[Scalar], mesh: &TriangleMesh) -> StratumResult<Scalar> {
        mesh.validate()?;
        if q.len() != 3 * mesh.vertex_count() {
            return Err(StratumError::InvalidState(format!(
                "Position vector has {} entries, mesh needs {}",
                q.len(),
                3 * mesh.vertex_count()
            )));
        }
        let at = |v: u32| DVec3::from_slice(&q[3 * v as usize..3 * v as usize + 3]);

        let mut closest_sq = Scalar::INFINITY;
        for v in 0..mesh.vertex_count() as u32 {
            for f in 0..mesh.face_count() {
                if mesh.vertex_of_face(v, f) {
                    continue;
                }
                for corner in mesh.face(f) {
                    closest_sq = closest_sq.min(at(v).distance_squared(at(corner)));
                }
            }
        }
        let mut closest = closest_sq.sqrt();
        tracing::debug!(bound = closest, "closest distance conservative bound");
        if !closest.is_finite() {
            return Ok(closest);
        }

        let log = TrajectoryLog::stationary(q);
        let candidates = self.broad.find_candidates(&log, mesh, closest)?;
        tracing::debug!(
            vf = candidates.vf.len(),
            ee = candidates.ee.len(),
            "checking closest distance candidates"
        );

        for s in &candidates.vf {
            let d = vertex_face_distance(at(s.p), at(s.q0), at(s.q1), at(s.q2)).distance();
            closest = closest.min(d);
        }
        for s in &candidates.ee {
            let d = edge_edge_distance(at(s.p0), at(s.p1), at(s.q0), at(s.q1)).distance();
            closest = closest.min(d);
        }

        Ok(closest)
    }
}
