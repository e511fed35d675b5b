//! Simulation state: flat per-DOF buffers for every vertex.
//!
//! This is the primary mutable data structure during collision resolution.
//! The scheduler advances individual DOFs lazily, so each one carries the
//! time at which its position and velocity were last made consistent.

use stratum_math::DVec3;
use stratum_mesh::TriangleMesh;
use stratum_types::{Scalar, StratumError, StratumResult};

/// Per-DOF simulation buffers.
///
/// # Layout
///
/// Every array has length `3 * vertex_count`, interleaved by vertex:
/// ```text
/// q: [x0, y0, z0, x1, y1, z1, ...]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Positions.
    pub q: Vec<Scalar>,
    /// Velocities.
    pub v: Vec<Scalar>,
    /// Inverse masses (0 for pinned vertices).
    pub minv: Vec<Scalar>,
    /// Simulation time at which each DOF's `q` and `v` were last advanced.
    pub last_update_time: Vec<Scalar>,
}

impl SimulationState {
    /// Initialize simulation state from a mesh and per-vertex mass.
    ///
    /// Copies positions from the mesh. Velocities start at zero.
    /// Pinned vertices get `minv = 0.0` (infinite mass).
    pub fn from_mesh(
        mesh: &TriangleMesh,
        vertex_mass: Scalar,
        pinned: &[bool],
    ) -> StratumResult<Self> {
        let n = mesh.vertex_count();

        if pinned.len() != n {
            return Err(StratumError::InvalidMesh(format!(
                "Pinned array length ({}) != vertex count ({})",
                pinned.len(),
                n
            )));
        }
        if !(vertex_mass > 0.0 && vertex_mass.is_finite()) {
            return Err(StratumError::InvalidState(format!(
                "Vertex mass must be positive and finite, got {vertex_mass}"
            )));
        }

        let minv = pinned
            .iter()
            .flat_map(|&p| [if p { 0.0 } else { 1.0 / vertex_mass }; 3])
            .collect();

        Ok(Self {
            q: mesh.interleaved_positions(),
            v: vec![0.0; 3 * n],
            minv,
            last_update_time: vec![0.0; 3 * n],
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.q.len() / 3
    }

    #[inline]
    pub fn dof_count(&self) -> usize {
        self.q.len()
    }

    #[inline]
    pub fn position(&self, vertex: usize) -> DVec3 {
        DVec3::from_slice(&self.q[3 * vertex..3 * vertex + 3])
    }

    #[inline]
    pub fn velocity(&self, vertex: usize) -> DVec3 {
        DVec3::from_slice(&self.v[3 * vertex..3 * vertex + 3])
    }

    pub fn set_velocity(&mut self, vertex: usize, velocity: DVec3) {
        velocity.write_to_slice(&mut self.v[3 * vertex..3 * vertex + 3]);
    }

    #[inline]
    pub fn is_pinned(&self, vertex: usize) -> bool {
        self.minv[3 * vertex] == 0.0
    }

    /// Declare every DOF consistent at `time`, starting a new step window.
    pub fn rebase_time(&mut self, time: Scalar) {
        self.last_update_time.fill(time);
    }

    /// Overwrite the mutable buffers from `snapshot`. Inverse masses stay.
    pub fn restore(&mut self, snapshot: &SimulationState) {
        self.q.copy_from_slice(&snapshot.q);
        self.v.copy_from_slice(&snapshot.v);
        self.last_update_time.copy_from_slice(&snapshot.last_update_time);
    }

    /// Check buffer lengths against a mesh.
    pub fn validate_for(&self, mesh: &TriangleMesh) -> StratumResult<()> {
        let dofs = 3 * mesh.vertex_count();
        let lengths = [
            self.q.len(),
            self.v.len(),
            self.minv.len(),
            self.last_update_time.len(),
        ];
        if lengths.iter().any(|&l| l != dofs) {
            return Err(StratumError::InvalidState(format!(
                "State buffers {lengths:?} do not match {dofs} mesh DOFs"
            )));
        }
        Ok(())
    }

    /// Compute total kinetic energy: 0.5 * Σ m_i * ||v_i||².
    pub fn kinetic_energy(&self) -> Scalar {
        self.v
            .iter()
            .zip(&self.minv)
            .filter(|&(_, &minv)| minv > 0.0)
            .map(|(v, minv)| 0.5 * v * v / minv)
            .sum()
    }
}
