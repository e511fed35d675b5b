//! Penalty group: one active layer.
//!
//! A group owns the penalty potentials of every stencil that has reached
//! its depth, and acts as a uniform clock in the event schedule: it fires
//! at `0, dt, 2 dt, ...` and each firing contributes an impulse
//! `force * dt` to the vertices it touches.

use std::collections::BTreeSet;

use stratum_contact::{EdgeEdgeStencil, VertexFaceStencil};
use stratum_math::DVec3;
use stratum_types::Scalar;

use crate::potential::{EdgeEdgePotential, PenaltyLaw, VertexFacePotential};

/// What a group's evaluation contributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contribution {
    /// Some potential produced a non-zero force.
    pub any: bool,
    /// Some potential of the queried generation produced a non-zero force.
    pub fresh: bool,
}

/// One layer of fixed stiffness, margin and timestep.
#[derive(Debug, Clone)]
pub struct PenaltyGroup {
    dt: Scalar,
    law: PenaltyLaw,
    step: u64,
    vf: Vec<VertexFacePotential>,
    ee: Vec<EdgeEdgePotential>,
    vertices: BTreeSet<u32>,
}

impl PenaltyGroup {
    pub fn new(
        dt: Scalar,
        eta: Scalar,
        inner_eta: Scalar,
        stiffness: Scalar,
        restitution: Scalar,
    ) -> Self {
        Self {
            dt,
            law: PenaltyLaw {
                eta,
                inner_eta,
                stiffness,
                restitution,
            },
            step: 0,
            vf: Vec::new(),
            ee: Vec::new(),
            vertices: BTreeSet::new(),
        }
    }

    /// Register a vertex-face potential added by escalation `generation`.
    pub fn add_vf_stencil(&mut self, stencil: VertexFaceStencil, generation: u32) {
        self.vertices.extend(stencil.vertices());
        self.vf.push(VertexFacePotential::new(stencil, generation));
    }

    /// Register an edge-edge potential added by escalation `generation`.
    pub fn add_ee_stencil(&mut self, stencil: EdgeEdgeStencil, generation: u32) {
        self.vertices.extend(stencil.vertices());
        self.ee.push(EdgeEdgePotential::new(stencil, generation));
    }

    /// Accumulate `force * dt` of every potential into `forces`.
    ///
    /// Only the DOFs of [`vertices`](Self::vertices) are read from `q`/`v`
    /// and written in `forces`. Returns whether anything was non-zero.
    pub fn add_force(&self, q: &[Scalar], v: &[Scalar], forces: &mut [Scalar]) -> bool {
        self.accumulate(q, v, forces, None).any
    }

    /// Like [`add_force`](Self::add_force), additionally reporting whether
    /// a potential registered by `generation` contributed.
    pub fn accumulate(
        &self,
        q: &[Scalar],
        v: &[Scalar],
        forces: &mut [Scalar],
        generation: Option<u32>,
    ) -> Contribution {
        let mut contribution = Contribution::default();

        let vf = self.vf.iter().filter_map(|p| {
            p.evaluate(&self.law, q, v)
                .map(|f| (p.generation, p.stencil.vertices(), f))
        });
        let ee = self.ee.iter().filter_map(|p| {
            p.evaluate(&self.law, q, v)
                .map(|f| (p.generation, p.stencil.vertices(), f))
        });

        for (potential_generation, vertices, f) in vf.chain(ee) {
            if f.iter().all(|fi| *fi == DVec3::ZERO) {
                continue;
            }
            contribution.any = true;
            contribution.fresh |= generation == Some(potential_generation);
            for (vertex, fi) in vertices.into_iter().zip(f) {
                let i = 3 * vertex as usize;
                let impulse = fi * self.dt;
                forces[i] += impulse.x;
                forces[i + 1] += impulse.y;
                forces[i + 2] += impulse.z;
            }
        }

        contribution
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn increment_time_step(&mut self) {
        self.step += 1;
    }

    /// Time of the next firing: `step * dt`.
    #[inline]
    pub fn next_fire_time(&self) -> Scalar {
        self.step as Scalar * self.dt
    }

    /// Reset the clock to zero. Potentials are kept.
    #[inline]
    pub fn rollback(&mut self) {
        self.step = 0;
    }

    #[inline]
    pub fn step(&self) -> u64 {
        self.step
    }

    #[inline]
    pub fn dt(&self) -> Scalar {
        self.dt
    }

    #[inline]
    pub fn outer_eta(&self) -> Scalar {
        self.law.eta
    }

    #[inline]
    pub fn inner_eta(&self) -> Scalar {
        self.law.inner_eta
    }

    #[inline]
    pub fn stiffness(&self) -> Scalar {
        self.law.stiffness
    }

    #[inline]
    pub fn restitution(&self) -> Scalar {
        self.law.restitution
    }

    pub fn law(&self) -> &PenaltyLaw {
        &self.law
    }

    /// Number of potentials owned by this group.
    pub fn stencil_count(&self) -> usize {
        self.vf.len() + self.ee.len()
    }

    pub fn vf_potentials(&self) -> &[VertexFacePotential] {
        &self.vf
    }

    pub fn ee_potentials(&self) -> &[EdgeEdgePotential] {
        &self.ee
    }

    /// Every vertex some owned stencil refers to, in ascending order.
    pub fn vertices(&self) -> &BTreeSet<u32> {
        &self.vertices
    }
}
