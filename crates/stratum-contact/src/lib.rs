//! # stratum-contact
//!
//! Collision detection over piecewise-linear vertex trajectories.
//!
//! One outer iteration of the layered scheduler records every vertex's
//! motion in a [`TrajectoryLog`]. Collision detection over that log runs
//! in two phases:
//! 1. **Broad phase**: sort-and-sweep over swept bounding boxes
//! 2. **Narrow phase**: continuous distance queries per candidate stencil
//!
//! Both phases are pluggable traits.

pub mod broad;
pub mod ccd;
pub mod narrow;
pub mod stencil;
pub mod sweep;
pub mod trajectory;

pub use broad::{BroadPhase, CandidateSet, NullBroadPhase, SweptBroadPhase};
pub use ccd::ConservativeAdvancement;
pub use narrow::{CollisionSet, NarrowPhase, NullNarrowPhase};
pub use stencil::{EdgeEdgeStencil, Stencil, StencilKind, VertexFaceStencil};
pub use trajectory::{Sample, TrajectoryLog};
