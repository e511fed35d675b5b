//! Stencil types: vertex-index tuples naming a potential collision pair.
//!
//! Stencils are plain values. They order lexicographically by their index
//! tuple so they can key ordered maps and sets, which keeps every
//! traversal over them deterministic.

use serde::{Deserialize, Serialize};

/// Kind of primitive pair a stencil names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StencilKind {
    /// A vertex against a triangle.
    VertexFace,
    /// An edge against another edge.
    EdgeEdge,
}

/// A vertex `p` against the triangle `(q0, q1, q2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexFaceStencil {
    pub p: u32,
    pub q0: u32,
    pub q1: u32,
    pub q2: u32,
}

impl VertexFaceStencil {
    pub fn new(p: u32, face: [u32; 3]) -> Self {
        Self {
            p,
            q0: face[0],
            q1: face[1],
            q2: face[2],
        }
    }

    /// `[p, q0, q1, q2]`
    #[inline]
    pub fn vertices(&self) -> [u32; 4] {
        [self.p, self.q0, self.q1, self.q2]
    }
}

/// Edge `p0 → p1` against edge `q0 → q1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeEdgeStencil {
    pub p0: u32,
    pub p1: u32,
    pub q0: u32,
    pub q1: u32,
}

impl EdgeEdgeStencil {
    pub fn new(p: [u32; 2], q: [u32; 2]) -> Self {
        Self {
            p0: p[0],
            p1: p[1],
            q0: q[0],
            q1: q[1],
        }
    }

    /// Order-independent construction: each edge as `(min, max)`, the
    /// smaller edge first. Two edges always map to the same stencil.
    pub fn canonical(a: [u32; 2], b: [u32; 2]) -> Self {
        let a = [a[0].min(a[1]), a[0].max(a[1])];
        let b = [b[0].min(b[1]), b[0].max(b[1])];
        if a <= b {
            Self::new(a, b)
        } else {
            Self::new(b, a)
        }
    }

    /// `[p0, p1, q0, q1]`
    #[inline]
    pub fn vertices(&self) -> [u32; 4] {
        [self.p0, self.p1, self.q0, self.q1]
    }
}

/// Either kind of stencil, for bookkeeping that treats both alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stencil {
    VertexFace(VertexFaceStencil),
    EdgeEdge(EdgeEdgeStencil),
}

impl Stencil {
    pub fn kind(&self) -> StencilKind {
        match self {
            Self::VertexFace(_) => StencilKind::VertexFace,
            Self::EdgeEdge(_) => StencilKind::EdgeEdge,
        }
    }

    pub fn vertices(&self) -> [u32; 4] {
        match self {
            Self::VertexFace(s) => s.vertices(),
            Self::EdgeEdge(s) => s.vertices(),
        }
    }
}

impl From<VertexFaceStencil> for Stencil {
    fn from(s: VertexFaceStencil) -> Self {
        Self::VertexFace(s)
    }
}

impl From<EdgeEdgeStencil> for Stencil {
    fn from(s: EdgeEdgeStencil) -> Self {
        Self::EdgeEdge(s)
    }
}
