//! # stratum-mesh
//!
//! Triangle mesh representation with Structure-of-Arrays (SoA) layout.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`]: Static connectivity plus rest positions.
//! - [`Topology`]: Adjacency queries (vertex-to-face, unique edges).
//! - Procedural generators for test and demo scenes.

pub mod generators;
pub mod mesh;
pub mod topology;

pub use mesh::TriangleMesh;
pub use topology::Topology;
