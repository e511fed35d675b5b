//! Conservative-advancement continuous collision detection.
//!
//! Over each interval where all four vertices of a stencil move linearly,
//! the primitive distance `d(t)` changes no faster than the largest
//! relative speed `L` between a vertex of one primitive and a vertex of the
//! other. Stepping `t += (d(t) - margin) / L` therefore never skips past
//! the first time the distance drops to the margin. The reported time is
//! a lower bound on the true contact time, within `tolerance * margin` of
//! distance.

use stratum_math::{edge_edge_distance, vertex_face_distance, DVec3};
use stratum_types::{Scalar, StratumError, StratumResult};

use crate::narrow::{CollisionSet, NarrowPhase};
use crate::stencil::{EdgeEdgeStencil, VertexFaceStencil};
use crate::trajectory::TrajectoryLog;

/// Conservative-advancement narrow phase.
#[derive(Debug, Clone)]
pub struct ConservativeAdvancement {
    /// Distance slack, as a fraction of the margin, at which a stencil
    /// counts as having reached its margin.
    pub tolerance: Scalar,
    /// Advancement steps per linear interval before giving up and
    /// conservatively reporting contact.
    pub max_steps: u32,
}

impl Default for ConservativeAdvancement {
    fn default() -> Self {
        Self {
            tolerance: 1.0e-3,
            max_steps: 4096,
        }
    }
}

impl ConservativeAdvancement {
    pub fn new(tolerance: Scalar, max_steps: u32) -> Self {
        Self { tolerance, max_steps }
    }

    /// Earliest time the vertex-face stencil comes within `margin`.
    pub fn vertex_face_contact(
        &self,
        log: &TrajectoryLog,
        stencil: &VertexFaceStencil,
        margin: Scalar,
    ) -> Option<Scalar> {
        self.first_contact(
            log,
            stencil.vertices(),
            margin,
            |x| vertex_face_distance(x[0], x[1], x[2], x[3]).distance(),
            |v| {
                (1..4)
                    .map(|i| (v[0] - v[i]).length())
                    .fold(0.0, Scalar::max)
            },
        )
    }

    /// Earliest time the edge-edge stencil comes within `margin`.
    pub fn edge_edge_contact(
        &self,
        log: &TrajectoryLog,
        stencil: &EdgeEdgeStencil,
        margin: Scalar,
    ) -> Option<Scalar> {
        self.first_contact(
            log,
            stencil.vertices(),
            margin,
            |x| edge_edge_distance(x[0], x[1], x[2], x[3]).distance(),
            |v| {
                [(0, 2), (0, 3), (1, 2), (1, 3)]
                    .iter()
                    .map(|&(i, j)| (v[i] - v[j]).length())
                    .fold(0.0, Scalar::max)
            },
        )
    }

    fn first_contact(
        &self,
        log: &TrajectoryLog,
        vertices: [u32; 4],
        margin: Scalar,
        distance: impl Fn(&[DVec3; 4]) -> Scalar,
        speed_bound: impl Fn(&[DVec3; 4]) -> Scalar,
    ) -> Option<Scalar> {
        let slack = self.tolerance * margin;
        let at = |t: Scalar| vertices.map(|v| log.position_at(v as usize, t));
        let times = log.breakpoints(&vertices);

        for window in times.windows(2) {
            let (t0, t1) = (window[0], window[1]);
            let x0 = at(t0);
            let x1 = at(t1);
            let span = t1 - t0;
            let velocity: [DVec3; 4] = std::array::from_fn(|i| (x1[i] - x0[i]) / span);
            let bound = speed_bound(&velocity);

            let mut t = t0;
            let mut cleared = false;
            for _ in 0..self.max_steps {
                let x: [DVec3; 4] = std::array::from_fn(|i| x0[i] + velocity[i] * (t - t0));
                let gap = distance(&x) - margin;
                if gap <= slack {
                    return Some(t);
                }
                // Rigid or stationary over the window: the gap is constant.
                if bound <= 0.0 {
                    cleared = true;
                    break;
                }
                t += gap / bound;
                if t >= t1 {
                    cleared = true;
                    break;
                }
            }
            if !cleared {
                // Step budget exhausted without clearing the interval.
                return Some(t);
            }
        }

        // The final instant (or a single-sample log) is not covered above.
        let last = *times.last()?;
        (distance(&at(last)) - margin <= slack).then_some(last)
    }
}

impl NarrowPhase for ConservativeAdvancement {
    fn find_collisions(
        &self,
        log: &TrajectoryLog,
        vf: &[(VertexFaceStencil, Scalar)],
        ee: &[(EdgeEdgeStencil, Scalar)],
    ) -> StratumResult<CollisionSet> {
        if !log.is_finalized() {
            return Err(StratumError::InvalidState(
                "Narrow phase requires a finalized trajectory log".into(),
            ));
        }

        let mut collisions = CollisionSet::default();

        for (stencil, margin) in vf {
            if let Some(t) = self.vertex_face_contact(log, stencil, *margin) {
                collisions.vf.insert(*stencil);
                collisions.record_time(t);
            }
        }
        for (stencil, margin) in ee {
            if let Some(t) = self.edge_edge_contact(log, stencil, *margin) {
                collisions.ee.insert(*stencil);
                collisions.record_time(t);
            }
        }

        tracing::trace!(
            vf = collisions.vf.len(),
            ee = collisions.ee.len(),
            earliest = ?collisions.earliest_time,
            "narrow phase collisions"
        );

        Ok(collisions)
    }

    fn name(&self) -> &str {
        "conservative_advancement"
    }
}
