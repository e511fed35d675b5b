//! Core triangle mesh type with SoA (Structure of Arrays) layout.
//!
//! The mesh holds static topology plus the rest configuration.
//! Deformed positions live in the simulation state, never here.

use serde::{Deserialize, Serialize};
use stratum_math::DVec3;
use stratum_types::{StratumError, StratumResult};

/// A triangle mesh stored in Structure-of-Arrays layout.
///
/// Triangle indices reference into the position channels. Faces are
/// immutable after construction; collision code only queries
/// connectivity from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// X coordinates of all vertices (rest configuration).
    pub pos_x: Vec<f64>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f64>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f64>,

    /// Triangle indices: each triangle is [v0, v1, v2].
    /// Stored flat: `[t0v0, t0v1, t0v2, t1v0, t1v1, t1v2, ...]`
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the rest position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> DVec3 {
        DVec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the three vertex indices of face `f`.
    #[inline]
    pub fn face(&self, f: usize) -> [u32; 3] {
        let base = f * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Returns true if vertex `v` is one of the corners of face `f`.
    #[inline]
    pub fn vertex_of_face(&self, v: u32, f: usize) -> bool {
        self.face(f).contains(&v)
    }

    /// Sets the rest position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, p: DVec3) {
        self.pos_x[i] = p.x;
        self.pos_y[i] = p.y;
        self.pos_z[i] = p.z;
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, p: DVec3) -> u32 {
        self.pos_x.push(p.x);
        self.pos_y.push(p.y);
        self.pos_z.push(p.z);
        (self.pos_x.len() - 1) as u32
    }

    /// Appends a face.
    pub fn push_face(&mut self, face: [u32; 3]) {
        self.indices.extend_from_slice(&face);
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, face_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(face_capacity * 3),
        }
    }

    /// Rest positions in interleaved DOF layout `[x0, y0, z0, x1, ...]`.
    pub fn interleaved_positions(&self) -> Vec<f64> {
        let mut q = Vec::with_capacity(self.vertex_count() * 3);
        for i in 0..self.vertex_count() {
            q.push(self.pos_x[i]);
            q.push(self.pos_y[i]);
            q.push(self.pos_z[i]);
        }
        q
    }

    /// Appends all of `other`'s vertices and faces, re-indexing its faces.
    ///
    /// The two parts stay disconnected, so pairs across them are never
    /// topologically adjacent.
    pub fn append(&mut self, other: &TriangleMesh) {
        let offset = self.vertex_count() as u32;
        self.pos_x.extend_from_slice(&other.pos_x);
        self.pos_y.extend_from_slice(&other.pos_y);
        self.pos_z.extend_from_slice(&other.pos_z);
        self.indices.extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length
    /// - Triangle indices are within bounds
    /// - No degenerate triangles (repeated vertex indices)
    pub fn validate(&self) -> StratumResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(StratumError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(StratumError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(StratumError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for f in 0..self.face_count() {
            let [a, b, c] = self.face(f);
            if a == b || b == c || a == c {
                return Err(StratumError::InvalidMesh(format!(
                    "Face {} has repeated vertex indices: [{}, {}, {}]",
                    f, a, b, c
                )));
            }
        }

        if self.pos_x.iter().chain(&self.pos_y).chain(&self.pos_z).any(|c| !c.is_finite()) {
            return Err(StratumError::InvalidMesh(
                "Vertex positions must be finite".into(),
            ));
        }

        Ok(())
    }

    /// Constructs a mesh from interleaved AoS position data.
    ///
    /// Converts `[x0, y0, z0, x1, y1, z1, ...]` to SoA layout.
    pub fn from_interleaved(positions: &[f64], indices: &[u32]) -> StratumResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(StratumError::InvalidMesh(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let mut mesh = Self::with_capacity(n, indices.len() / 3);

        for i in 0..n {
            mesh.pos_x.push(positions[i * 3]);
            mesh.pos_y.push(positions[i * 3 + 1]);
            mesh.pos_z.push(positions[i * 3 + 2]);
        }

        mesh.indices = indices.to_vec();
        mesh.validate()?;
        Ok(mesh)
    }
}
