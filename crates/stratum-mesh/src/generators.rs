//! Procedural mesh generators for tests and demo scenarios.
//!
//! These generators produce deterministic, resolution-configurable meshes
//! with consistent winding order.

use stratum_math::DVec3;

use crate::mesh::TriangleMesh;

/// Generates a flat rectangular quad grid in the XY plane at height `z`.
///
/// The grid spans `[-width/2, width/2]` in X and `[-height/2, height/2]` in Y.
///
/// # Arguments
/// - `cols`: Number of quads along X (vertex count = cols + 1).
/// - `rows`: Number of quads along Y (vertex count = rows + 1).
/// - `width`: Total width in meters.
/// - `height`: Total height in meters.
///
/// # Example
/// ```
/// use stratum_mesh::generators::quad_grid;
/// let mesh = quad_grid(2, 2, 1.0, 1.0, 0.0);
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 vertices
/// assert_eq!(mesh.face_count(), 8);    // 2×2 quads × 2 tris each
/// ```
pub fn quad_grid(cols: usize, rows: usize, width: f64, height: f64, z: f64) -> TriangleMesh {
    let verts_x = cols + 1;
    let verts_y = rows + 1;
    let mut mesh = TriangleMesh::with_capacity(verts_x * verts_y, cols * rows * 2);

    let half_w = width / 2.0;
    let half_h = height / 2.0;

    for j in 0..verts_y {
        for i in 0..verts_x {
            let u = i as f64 / cols as f64;
            let v = j as f64 / rows as f64;
            mesh.push_vertex(DVec3::new(-half_w + u * width, half_h - v * height, z));
        }
    }

    for j in 0..rows {
        for i in 0..cols {
            let top_left = (j * verts_x + i) as u32;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x as u32;
            let bot_right = bot_left + 1;

            mesh.push_face([top_left, bot_left, top_right]);
            mesh.push_face([top_right, bot_left, bot_right]);
        }
    }

    mesh
}

/// A single right triangle in the z = 0 plane with legs of length `size`.
pub fn single_triangle(size: f64) -> TriangleMesh {
    let mut mesh = TriangleMesh::with_capacity(3, 1);
    mesh.push_vertex(DVec3::ZERO);
    mesh.push_vertex(DVec3::new(size, 0.0, 0.0));
    mesh.push_vertex(DVec3::new(0.0, size, 0.0));
    mesh.push_face([0, 1, 2]);
    mesh
}

/// A triangle in the z = 0 plane (vertices 0..3) plus a free vertex
/// (vertex 3) hovering `gap` above its centroid.
pub fn vertex_over_triangle(size: f64, gap: f64) -> TriangleMesh {
    let mut mesh = single_triangle(size);
    mesh.push_vertex(DVec3::new(size / 3.0, size / 3.0, gap));
    mesh
}

/// Two disconnected triangles whose free edges cross at right angles,
/// separated by `gap` along Z.
///
/// The lower triangle's edge `0 → 1` lies along X; the upper triangle's
/// edge `3 → 4` lies along Y and passes over its midpoint. The wings
/// (vertices 2 and 5) point away so the only close pair is edge-edge.
pub fn crossing_edges(length: f64, gap: f64) -> TriangleMesh {
    let h = length / 2.0;
    let mut mesh = TriangleMesh::with_capacity(6, 2);
    mesh.push_vertex(DVec3::new(-h, 0.0, 0.0));
    mesh.push_vertex(DVec3::new(h, 0.0, 0.0));
    mesh.push_vertex(DVec3::new(0.0, 0.0, -length));
    mesh.push_vertex(DVec3::new(0.0, -h, gap));
    mesh.push_vertex(DVec3::new(0.0, h, gap));
    mesh.push_vertex(DVec3::new(0.0, 0.0, gap + length));
    mesh.push_face([0, 1, 2]);
    mesh.push_face([3, 4, 5]);
    mesh
}

/// Two parallel `cols × rows` sheets, the second `gap` above the first.
///
/// Vertices `0..n` belong to the lower sheet and `n..2n` to the upper one,
/// where `n = (cols + 1) * (rows + 1)`.
pub fn stacked_sheets(cols: usize, rows: usize, size: f64, gap: f64) -> TriangleMesh {
    let mut mesh = quad_grid(cols, rows, size, size, 0.0);
    mesh.append(&quad_grid(cols, rows, size, size, gap));
    mesh
}
