//! # stratum-math
//!
//! Geometry primitives for the stratum collision engine.
//!
//! Provides:
//! - Re-exports of `glam` double-precision types (`DVec3`, etc.)
//! - Axis-aligned bounding boxes for broad-phase culling
//! - Closest-point distance between a vertex and a triangle,
//!   and between two edges

pub mod aabb;
pub mod distance;

// Re-export glam types as the canonical math types for stratum.
pub use glam::{DMat3, DVec2, DVec3};

pub use aabb::Aabb;
pub use distance::{edge_edge_distance, vertex_face_distance, EdgeEdgeDistance, VertexFaceDistance};
