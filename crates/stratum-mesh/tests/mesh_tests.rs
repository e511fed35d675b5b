//! Integration tests for stratum-mesh.

use stratum_math::DVec3;
use stratum_mesh::generators::{crossing_edges, quad_grid, single_triangle, stacked_sheets, vertex_over_triangle};
use stratum_mesh::topology::Topology;
use stratum_mesh::TriangleMesh;

// ─── TriangleMesh Tests ───────────────────────────────────────

#[test]
fn basic_counts() {
    let mesh = single_triangle(1.0);
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.face_count(), 1);
}

#[test]
fn position_access() {
    let mesh = single_triangle(2.0);
    assert_eq!(mesh.position(1), DVec3::new(2.0, 0.0, 0.0));
}

#[test]
fn face_access_and_adjacency() {
    let mesh = vertex_over_triangle(1.0, 0.1);
    assert_eq!(mesh.face(0), [0, 1, 2]);
    assert!(mesh.vertex_of_face(1, 0));
    assert!(!mesh.vertex_of_face(3, 0));
}

#[test]
fn validate_ok() {
    assert!(single_triangle(1.0).validate().is_ok());
}

#[test]
fn validate_catches_inconsistent_lengths() {
    let mut mesh = single_triangle(1.0);
    mesh.pos_y.push(99.0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = single_triangle(1.0);
    mesh.indices[2] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_degenerate() {
    let mut mesh = single_triangle(1.0);
    mesh.indices = vec![0, 0, 1];
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_non_finite() {
    let mut mesh = single_triangle(1.0);
    mesh.pos_z[0] = f64::NAN;
    assert!(mesh.validate().is_err());
}

#[test]
fn from_interleaved() {
    let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let mesh = TriangleMesh::from_interleaved(&positions, &[0, 1, 2]).unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.pos_x, vec![0.0, 1.0, 0.0]);
    assert_eq!(mesh.interleaved_positions(), positions);
}

#[test]
fn from_interleaved_rejects_ragged() {
    assert!(TriangleMesh::from_interleaved(&[0.0, 1.0], &[]).is_err());
}

#[test]
fn append_reindexes_faces() {
    let mut mesh = single_triangle(1.0);
    mesh.append(&single_triangle(1.0));
    assert_eq!(mesh.vertex_count(), 6);
    assert_eq!(mesh.face(1), [3, 4, 5]);
    assert!(mesh.validate().is_ok());
}

#[test]
fn mesh_serialization() {
    let mesh = vertex_over_triangle(1.0, 0.25);
    let json = serde_json::to_string(&mesh).unwrap();
    let recovered: TriangleMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.indices, mesh.indices);
    assert_eq!(recovered.pos_z, mesh.pos_z);
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn quad_grid_2x2() {
    let mesh = quad_grid(2, 2, 1.0, 1.0, 0.0);
    assert_eq!(mesh.vertex_count(), 9);
    assert_eq!(mesh.face_count(), 8);
    assert!(mesh.validate().is_ok());
}

#[test]
fn quad_grid_dimensions() {
    let mesh = quad_grid(4, 4, 2.0, 2.0, 0.5);
    assert!((mesh.pos_x[0] - (-1.0)).abs() < 1e-12);
    assert!((mesh.pos_y[0] - 1.0).abs() < 1e-12);
    assert!((mesh.pos_x[4] - 1.0).abs() < 1e-12);
    assert!(mesh.pos_z.iter().all(|&z| z == 0.5));
}

#[test]
fn vertex_over_triangle_layout() {
    let mesh = vertex_over_triangle(3.0, 0.2);
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.position(3), DVec3::new(1.0, 1.0, 0.2));
}

#[test]
fn crossing_edges_layout() {
    let mesh = crossing_edges(1.0, 0.05);
    assert_eq!(mesh.vertex_count(), 6);
    assert_eq!(mesh.face_count(), 2);
    assert!(mesh.validate().is_ok());
    assert!((mesh.position(3).z - 0.05).abs() < 1e-12);
}

#[test]
fn stacked_sheets_layout() {
    let mesh = stacked_sheets(2, 2, 1.0, 0.1);
    assert_eq!(mesh.vertex_count(), 18);
    assert_eq!(mesh.face_count(), 16);
    assert!(mesh.validate().is_ok());
    assert!((mesh.pos_z[9] - 0.1).abs() < 1e-12);
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn topology_single_quad() {
    let mesh = quad_grid(1, 1, 1.0, 1.0, 0.0);
    let topo = Topology::build(&mesh);
    assert_eq!(topo.edge_count(), 5);
    assert!(topo.edges.contains(&[0, 3]) || topo.edges.contains(&[1, 2]));
}

#[test]
fn topology_edges_sorted_and_canonical() {
    let mesh = quad_grid(3, 2, 1.0, 1.0, 0.0);
    let topo = Topology::build(&mesh);
    assert!(topo.edges.iter().all(|[a, b]| a < b));
    assert!(topo.edges.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn vertex_face_adjacency() {
    let mesh = quad_grid(2, 2, 1.0, 1.0, 0.0);
    let topo = Topology::build(&mesh);
    assert_eq!(topo.vertex_faces[4].len(), 6);
}

#[test]
fn edge_adjacency() {
    let mesh = single_triangle(1.0);
    let topo = Topology::build(&mesh);
    assert_eq!(topo.edge_count(), 3);
    assert!(topo.edges_adjacent(0, 1));

    let mesh = crossing_edges(1.0, 0.1);
    let topo = Topology::build(&mesh);
    let lower = topo.edges.iter().position(|e| *e == [0, 1]).unwrap();
    let upper = topo.edges.iter().position(|e| *e == [3, 4]).unwrap();
    assert!(!topo.edges_adjacent(lower, upper));
}
