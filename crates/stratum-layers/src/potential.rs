//! Penalty force potentials for vertex-face and edge-edge stencils.
//!
//! A potential is zero while its primitives are at least `eta` apart.
//! Inside the margin it pushes them apart along their separation with
//! magnitude `k (eta - d)`, plus a damping term on the closing normal
//! velocity:
//!
//! ```text
//! f = k (eta - d) + 2 (1 - cor) sqrt(k) ramp (-v_n)    (v_n < 0 only)
//! ramp = clamp((eta - d) / (eta - inner_eta), 0, 1)
//! ```
//!
//! The force is split over the stencil's four vertices with the closest
//! points' interpolation weights, so the total is momentum-free.

use stratum_contact::{EdgeEdgeStencil, VertexFaceStencil};
use stratum_math::{edge_edge_distance, vertex_face_distance, DVec3};
use stratum_types::constants::EPSILON;
use stratum_types::Scalar;

/// Force law parameters shared by every potential of one layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyLaw {
    pub eta: Scalar,
    pub inner_eta: Scalar,
    pub stiffness: Scalar,
    pub restitution: Scalar,
}

impl PenaltyLaw {
    /// Repulsive force magnitude at distance `d` with normal relative
    /// velocity `vn` (negative when closing).
    pub fn magnitude(&self, d: Scalar, vn: Scalar) -> Scalar {
        if d >= self.eta || d <= EPSILON {
            return 0.0;
        }
        let penetration = self.eta - d;
        let spring = self.stiffness * penetration;
        if vn >= 0.0 {
            return spring;
        }
        let shell = self.eta - self.inner_eta;
        let ramp = if shell > 0.0 {
            (penetration / shell).clamp(0.0, 1.0)
        } else {
            1.0
        };
        spring + 2.0 * (1.0 - self.restitution) * self.stiffness.sqrt() * ramp * (-vn)
    }
}

#[inline]
fn vec3(x: &[Scalar], vertex: u32) -> DVec3 {
    let i = 3 * vertex as usize;
    DVec3::new(x[i], x[i + 1], x[i + 2])
}

/// Penalty potential on a vertex-face stencil.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexFacePotential {
    pub stencil: VertexFaceStencil,
    /// Escalation generation that registered this potential.
    pub generation: u32,
}

impl VertexFacePotential {
    pub fn new(stencil: VertexFaceStencil, generation: u32) -> Self {
        Self { stencil, generation }
    }

    /// Forces on `[p, q0, q1, q2]`, or `None` outside the margin.
    pub fn evaluate(&self, law: &PenaltyLaw, q: &[Scalar], v: &[Scalar]) -> Option<[DVec3; 4]> {
        let [p, q0, q1, q2] = self.stencil.vertices();
        let query = vertex_face_distance(vec3(q, p), vec3(q, q0), vec3(q, q1), vec3(q, q2));
        let d = query.distance();
        if d >= law.eta || d <= EPSILON {
            return None;
        }
        let n = query.separation / d;
        let [w0, w1, w2] = query.weights;

        let relative = vec3(v, p) - (vec3(v, q0) * w0 + vec3(v, q1) * w1 + vec3(v, q2) * w2);
        let f = n * law.magnitude(d, relative.dot(n));
        Some([f, -f * w0, -f * w1, -f * w2])
    }
}

/// Penalty potential on an edge-edge stencil.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEdgePotential {
    pub stencil: EdgeEdgeStencil,
    pub generation: u32,
}

impl EdgeEdgePotential {
    pub fn new(stencil: EdgeEdgeStencil, generation: u32) -> Self {
        Self { stencil, generation }
    }

    /// Forces on `[p0, p1, q0, q1]`, or `None` outside the margin.
    pub fn evaluate(&self, law: &PenaltyLaw, q: &[Scalar], v: &[Scalar]) -> Option<[DVec3; 4]> {
        let [p0, p1, q0, q1] = self.stencil.vertices();
        let query = edge_edge_distance(vec3(q, p0), vec3(q, p1), vec3(q, q0), vec3(q, q1));
        let d = query.distance();
        if d >= law.eta || d <= EPSILON {
            return None;
        }
        let n = query.separation / d;
        let (s, t) = (query.s, query.t);

        let vp = vec3(v, p0) * (1.0 - s) + vec3(v, p1) * s;
        let vq = vec3(v, q0) * (1.0 - t) + vec3(v, q1) * t;
        let f = n * law.magnitude(d, (vp - vq).dot(n));
        Some([f * (1.0 - s), f * s, -f * (1.0 - t), -f * t])
    }
}
