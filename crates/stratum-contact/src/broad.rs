//! Broad phase collision detection.
//!
//! Quickly identifies *candidate* stencils whose primitives may come within
//! a margin of each other at some time during the logged interval. The
//! filter must be conservative: every pair that truly approaches closer
//! than the margin has to be reported. The narrow phase then refines
//! these candidates into confirmed collisions.

use std::collections::BTreeSet;

use stratum_math::Aabb;
use stratum_mesh::{Topology, TriangleMesh};
use stratum_types::{Scalar, StratumError, StratumResult};

use crate::stencil::{EdgeEdgeStencil, VertexFaceStencil};
use crate::sweep::{overlapping_pairs, overlapping_pairs_between};
use crate::trajectory::TrajectoryLog;

/// Candidate stencils produced by a broad phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    pub vf: BTreeSet<VertexFaceStencil>,
    pub ee: BTreeSet<EdgeEdgeStencil>,
}

impl CandidateSet {
    pub fn is_empty(&self) -> bool {
        self.vf.is_empty() && self.ee.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vf.len() + self.ee.len()
    }
}

/// Trait for broad phase collision detection.
///
/// # Implementations
/// - [`SweptBroadPhase`]: sort-and-sweep over swept bounding boxes
/// - [`NullBroadPhase`]: reports nothing
pub trait BroadPhase: Send {
    /// Conservatively collect every non-adjacent vertex-face and edge-edge
    /// pair that may come within `margin` during the logged interval.
    fn find_candidates(
        &mut self,
        log: &TrajectoryLog,
        mesh: &TriangleMesh,
        margin: Scalar,
    ) -> StratumResult<CandidateSet>;

    /// Returns the broad phase strategy name.
    fn name(&self) -> &str;
}

/// Swept-volume broad phase.
///
/// Every vertex is bounded by the box of all its logged samples; faces and
/// edges by the union of their corners' boxes. Each box is padded by half
/// the margin, so two primitives that come within `margin` of each other
/// always have overlapping boxes.
#[derive(Debug, Default)]
pub struct SweptBroadPhase;

impl SweptBroadPhase {
    pub fn new() -> Self {
        Self
    }
}

impl BroadPhase for SweptBroadPhase {
    fn find_candidates(
        &mut self,
        log: &TrajectoryLog,
        mesh: &TriangleMesh,
        margin: Scalar,
    ) -> StratumResult<CandidateSet> {
        mesh.validate()?;
        if log.vertex_count() != mesh.vertex_count() {
            return Err(StratumError::InvalidState(format!(
                "Trajectory log has {} vertices, mesh has {}",
                log.vertex_count(),
                mesh.vertex_count()
            )));
        }

        let pad = 0.5 * margin;
        let vertex_bounds: Vec<Aabb> = (0..mesh.vertex_count())
            .map(|v| log.swept_bounds(v))
            .collect();
        let corner_union = |corners: &[u32]| {
            corners
                .iter()
                .fold(Aabb::EMPTY, |acc, &v| acc.union(vertex_bounds[v as usize]))
                .inflated(pad)
        };

        let topology = Topology::build(mesh);
        let mut candidates = CandidateSet::default();

        // Vertex-face pairs
        let vertex_boxes: Vec<Aabb> = vertex_bounds.iter().map(|b| b.inflated(pad)).collect();
        let face_boxes: Vec<Aabb> = (0..mesh.face_count())
            .map(|f| corner_union(&mesh.face(f)[..]))
            .collect();
        for (v, f) in overlapping_pairs_between(&vertex_boxes, &face_boxes) {
            if topology.vertex_faces[v].contains(&(f as u32)) {
                continue;
            }
            candidates.vf.insert(VertexFaceStencil::new(v as u32, mesh.face(f)));
        }

        // Edge-edge pairs
        let edge_boxes: Vec<Aabb> = topology.edges.iter().map(|e| corner_union(&e[..])).collect();
        for (a, b) in overlapping_pairs(&edge_boxes) {
            if topology.edges_adjacent(a, b) {
                continue;
            }
            candidates
                .ee
                .insert(EdgeEdgeStencil::canonical(topology.edges[a], topology.edges[b]));
        }

        tracing::trace!(
            vf = candidates.vf.len(),
            ee = candidates.ee.len(),
            margin,
            "broad phase candidates"
        );

        Ok(candidates)
    }

    fn name(&self) -> &str {
        "swept_sweep_and_prune"
    }
}

/// No-op broad phase for scenes that never collide.
pub struct NullBroadPhase;

impl BroadPhase for NullBroadPhase {
    fn find_candidates(
        &mut self,
        _log: &TrajectoryLog,
        _mesh: &TriangleMesh,
        _margin: Scalar,
    ) -> StratumResult<CandidateSet> {
        Ok(CandidateSet::default())
    }

    fn name(&self) -> &str {
        "null_broad_phase"
    }
}
