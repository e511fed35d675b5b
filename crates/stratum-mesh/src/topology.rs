//! Mesh topology queries.
//!
//! Builds adjacency data structures from the triangle index buffer.
//! Collision culling needs the unique edge list (for edge-edge stencils)
//! and the vertex-to-face fan (for adjacency exclusion).

use std::collections::BTreeSet;

use crate::mesh::TriangleMesh;

/// Precomputed topology information for a triangle mesh.
///
/// Built once when a mesh is loaded. Edge order is deterministic
/// (sorted by vertex pair) so that every stencil set derived from it
/// iterates identically across runs.
#[derive(Debug, Clone)]
pub struct Topology {
    /// For each vertex, the list of faces that contain it.
    pub vertex_faces: Vec<Vec<u32>>,

    /// Unique edges as `[v_min, v_max]` pairs, sorted.
    pub edges: Vec<[u32; 2]>,
}

impl Topology {
    /// Build topology from a triangle mesh.
    pub fn build(mesh: &TriangleMesh) -> Self {
        let vertex_count = mesh.vertex_count();
        let face_count = mesh.face_count();

        let mut vertex_faces: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        for f in 0..face_count {
            for v in mesh.face(f) {
                vertex_faces[v as usize].push(f as u32);
            }
        }

        // Canonical [min, max] keeps shared edges from appearing twice
        let mut edge_set: BTreeSet<[u32; 2]> = BTreeSet::new();
        for f in 0..face_count {
            let [a, b, c] = mesh.face(f);
            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                edge_set.insert([v0.min(v1), v0.max(v1)]);
            }
        }

        Self {
            vertex_faces,
            edges: edge_set.into_iter().collect(),
        }
    }

    /// Returns the number of unique edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if edges `a` and `b` share a vertex.
    #[inline]
    pub fn edges_adjacent(&self, a: usize, b: usize) -> bool {
        let [a0, a1] = self.edges[a];
        let [b0, b1] = self.edges[b];
        a0 == b0 || a0 == b1 || a1 == b0 || a1 == b1
    }
}
