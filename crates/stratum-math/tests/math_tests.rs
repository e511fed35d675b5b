//! Integration tests for stratum-math.

use stratum_math::{edge_edge_distance, vertex_face_distance, Aabb, DVec3};

fn v(x: f64, y: f64, z: f64) -> DVec3 {
    DVec3::new(x, y, z)
}

// ─── Aabb Tests ───────────────────────────────────────────────

#[test]
fn empty_box_grows_to_point() {
    let b = Aabb::EMPTY;
    assert!(b.is_empty());
    let g = b.grown(v(1.0, 2.0, 3.0));
    assert!(!g.is_empty());
    assert_eq!(g.min, v(1.0, 2.0, 3.0));
    assert_eq!(g.max, v(1.0, 2.0, 3.0));
}

#[test]
fn from_points_bounds_all() {
    let b = Aabb::from_points([v(0.0, 0.0, 0.0), v(1.0, -1.0, 2.0), v(-3.0, 0.5, 0.0)]);
    assert_eq!(b.min, v(-3.0, -1.0, 0.0));
    assert_eq!(b.max, v(1.0, 0.5, 2.0));
    assert!(b.is_finite());
}

#[test]
fn inflation_creates_overlap() {
    let a = Aabb::from_point(v(0.0, 0.0, 0.0));
    let b = Aabb::from_point(v(0.1, 0.0, 0.0));
    assert!(!a.overlaps(&b));
    assert!(a.inflated(0.05).overlaps(&b.inflated(0.05)));
    assert!(!a.inflated(0.04).overlaps(&b.inflated(0.04)));
}

#[test]
fn union_contains_both() {
    let a = Aabb::from_point(v(0.0, 0.0, 0.0));
    let b = Aabb::from_point(v(1.0, 1.0, 1.0));
    let u = a.union(b);
    assert!(u.overlaps(&a));
    assert!(u.overlaps(&b));
    assert_eq!(u.max, v(1.0, 1.0, 1.0));
}

// ─── Vertex-Face Distance Tests ───────────────────────────────

#[test]
fn vertex_above_triangle_interior() {
    let r = vertex_face_distance(
        v(0.25, 0.25, 0.5),
        v(0.0, 0.0, 0.0),
        v(1.0, 0.0, 0.0),
        v(0.0, 1.0, 0.0),
    );
    assert!((r.distance() - 0.5).abs() < 1e-12);
    assert!((r.separation - v(0.0, 0.0, 0.5)).length() < 1e-12);
    assert!((r.weights[1] - 0.25).abs() < 1e-12);
    assert!((r.weights[2] - 0.25).abs() < 1e-12);
    assert!((r.weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
}

#[test]
fn vertex_nearest_corner() {
    let r = vertex_face_distance(
        v(-1.0, -1.0, 0.0),
        v(0.0, 0.0, 0.0),
        v(1.0, 0.0, 0.0),
        v(0.0, 1.0, 0.0),
    );
    assert_eq!(r.weights, [1.0, 0.0, 0.0]);
    assert!((r.distance() - 2.0_f64.sqrt()).abs() < 1e-12);
}

#[test]
fn vertex_nearest_hypotenuse() {
    let r = vertex_face_distance(
        v(1.0, 1.0, 0.0),
        v(0.0, 0.0, 0.0),
        v(1.0, 0.0, 0.0),
        v(0.0, 1.0, 0.0),
    );
    assert!(r.weights[0].abs() < 1e-12);
    assert!((r.weights[1] - 0.5).abs() < 1e-12);
    assert!((r.distance() - 0.5_f64.sqrt()).abs() < 1e-12);
}

#[test]
fn collinear_triangle_falls_back_to_edges() {
    let r = vertex_face_distance(
        v(0.5, 1.0, 0.0),
        v(0.0, 0.0, 0.0),
        v(1.0, 0.0, 0.0),
        v(2.0, 0.0, 0.0),
    );
    assert!((r.distance() - 1.0).abs() < 1e-12);
    assert!(r.weights.iter().all(|w| w.is_finite()));
}

// ─── Edge-Edge Distance Tests ─────────────────────────────────

#[test]
fn crossing_edges() {
    let r = edge_edge_distance(
        v(-1.0, 0.0, 0.0),
        v(1.0, 0.0, 0.0),
        v(0.0, -1.0, 0.3),
        v(0.0, 1.0, 0.3),
    );
    assert!((r.distance() - 0.3).abs() < 1e-12);
    assert!((r.s - 0.5).abs() < 1e-12);
    assert!((r.t - 0.5).abs() < 1e-12);
    assert!(r.separation.z < 0.0);
}

#[test]
fn parallel_edges() {
    let r = edge_edge_distance(
        v(0.0, 0.0, 0.0),
        v(1.0, 0.0, 0.0),
        v(0.0, 0.2, 0.0),
        v(1.0, 0.2, 0.0),
    );
    assert!((r.distance() - 0.2).abs() < 1e-12);
}

#[test]
fn endpoint_to_endpoint() {
    let r = edge_edge_distance(
        v(0.0, 0.0, 0.0),
        v(1.0, 0.0, 0.0),
        v(2.0, 0.0, 0.0),
        v(3.0, 0.0, 0.0),
    );
    assert!((r.distance() - 1.0).abs() < 1e-12);
    assert!((r.s - 1.0).abs() < 1e-12);
    assert!(r.t.abs() < 1e-12);
}

#[test]
fn zero_length_edge_is_a_point() {
    let r = edge_edge_distance(
        v(0.5, 1.0, 0.0),
        v(0.5, 1.0, 0.0),
        v(0.0, 0.0, 0.0),
        v(1.0, 0.0, 0.0),
    );
    assert!((r.distance() - 1.0).abs() < 1e-12);
    assert!((r.t - 0.5).abs() < 1e-12);
}
