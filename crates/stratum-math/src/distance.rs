//! Closest-point queries between mesh primitives at a single configuration.
//!
//! Both queries follow the region-classification approach of Ericson,
//! *Real-Time Collision Detection* (§5.1.5 and §5.1.9), and return the
//! separation vector together with the interpolation weights of the
//! closest points so callers can distribute forces onto the primitive's
//! vertices.

use glam::DVec3;
use stratum_types::constants::EPSILON;
use stratum_types::Scalar;

/// Result of a vertex-triangle closest-point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexFaceDistance {
    /// `p - closest`, pointing from the triangle towards the vertex.
    pub separation: DVec3,
    /// Barycentric weights of the closest point on the triangle.
    pub weights: [Scalar; 3],
}

impl VertexFaceDistance {
    #[inline]
    pub fn distance(&self) -> Scalar {
        self.separation.length()
    }
}

/// Result of an edge-edge closest-point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEdgeDistance {
    /// `closest_on_p - closest_on_q`, pointing from edge q towards edge p.
    pub separation: DVec3,
    /// Parameter of the closest point along `p0 → p1`.
    pub s: Scalar,
    /// Parameter of the closest point along `q0 → q1`.
    pub t: Scalar,
}

impl EdgeEdgeDistance {
    #[inline]
    pub fn distance(&self) -> Scalar {
        self.separation.length()
    }
}

/// Closest point on triangle `(q0, q1, q2)` to `p`.
pub fn vertex_face_distance(p: DVec3, q0: DVec3, q1: DVec3, q2: DVec3) -> VertexFaceDistance {
    let weights = closest_barycentric(p, q0, q1, q2);
    let closest = q0 * weights[0] + q1 * weights[1] + q2 * weights[2];
    VertexFaceDistance {
        separation: p - closest,
        weights,
    }
}

/// Closest points between segments `p0 → p1` and `q0 → q1`.
pub fn edge_edge_distance(p0: DVec3, p1: DVec3, q0: DVec3, q1: DVec3) -> EdgeEdgeDistance {
    let (s, t) = closest_segment_params(p0, p1, q0, q1);
    let cp = p0 + (p1 - p0) * s;
    let cq = q0 + (q1 - q0) * t;
    EdgeEdgeDistance {
        separation: cp - cq,
        s,
        t,
    }
}

fn closest_barycentric(p: DVec3, a: DVec3, b: DVec3, c: DVec3) -> [Scalar; 3] {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return [1.0, 0.0, 0.0];
    }

    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return [0.0, 1.0, 0.0];
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return [1.0 - v, v, 0.0];
    }

    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return [0.0, 0.0, 1.0];
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return [1.0 - w, 0.0, w];
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return [0.0, 1.0 - w, w];
    }

    let sum = va + vb + vc;
    if sum.abs() <= EPSILON * ab.length_squared().max(ac.length_squared()).max(1.0) {
        return degenerate_barycentric(p, a, b, c);
    }

    let v = vb / sum;
    let w = vc / sum;
    [1.0 - v - w, v, w]
}

/// Collinear or collapsed triangle: take the nearest of its three edges.
fn degenerate_barycentric(p: DVec3, a: DVec3, b: DVec3, c: DVec3) -> [Scalar; 3] {
    let on_segment = |x: DVec3, y: DVec3| -> (Scalar, Scalar) {
        let d = y - x;
        let len2 = d.length_squared();
        let u = if len2 > EPSILON { ((p - x).dot(d) / len2).clamp(0.0, 1.0) } else { 0.0 };
        (u, (p - (x + d * u)).length_squared())
    };

    let (u_ab, d_ab) = on_segment(a, b);
    let (u_bc, d_bc) = on_segment(b, c);
    let (u_ca, d_ca) = on_segment(c, a);

    if d_ab <= d_bc && d_ab <= d_ca {
        [1.0 - u_ab, u_ab, 0.0]
    } else if d_bc <= d_ca {
        [0.0, 1.0 - u_bc, u_bc]
    } else {
        [u_ca, 0.0, 1.0 - u_ca]
    }
}

fn closest_segment_params(p0: DVec3, p1: DVec3, q0: DVec3, q1: DVec3) -> (Scalar, Scalar) {
    let d1 = p1 - p0;
    let d2 = q1 - q0;
    let r = p0 - q0;
    let a = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(r);

    if a <= EPSILON && e <= EPSILON {
        return (0.0, 0.0);
    }
    if a <= EPSILON {
        return (0.0, (f / e).clamp(0.0, 1.0));
    }

    let c = d1.dot(r);
    if e <= EPSILON {
        return ((-c / a).clamp(0.0, 1.0), 0.0);
    }

    let b = d1.dot(d2);
    let denom = a * e - b * b;

    // Parallel segments: any s works, pick the start.
    let mut s = if denom > EPSILON * a * e {
        ((b * f - c * e) / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut t = (b * s + f) / e;
    if t < 0.0 {
        t = 0.0;
        s = (-c / a).clamp(0.0, 1.0);
    } else if t > 1.0 {
        t = 1.0;
        s = ((b - c) / a).clamp(0.0, 1.0);
    }

    (s, t)
}
