//! Narrow phase collision detection trait.
//!
//! Refines broad phase candidates into confirmed collisions: stencils whose
//! primitives come closer than their own required margin at some time
//! during the logged interval, and the earliest such time.

use std::collections::BTreeSet;

use stratum_types::{Scalar, StratumResult};

use crate::stencil::{EdgeEdgeStencil, VertexFaceStencil};
use crate::trajectory::TrajectoryLog;

/// Confirmed collisions over one logged interval.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionSet {
    pub vf: BTreeSet<VertexFaceStencil>,
    pub ee: BTreeSet<EdgeEdgeStencil>,
    /// Earliest time any confirmed stencil reaches its margin.
    /// `None` when nothing collides.
    pub earliest_time: Option<Scalar>,
}

impl CollisionSet {
    pub fn is_empty(&self) -> bool {
        self.vf.is_empty() && self.ee.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vf.len() + self.ee.len()
    }

    /// Folds a collision at `time` into the earliest-time bookkeeping.
    pub fn record_time(&mut self, time: Scalar) {
        self.earliest_time = Some(self.earliest_time.map_or(time, |t| t.min(time)));
    }
}

/// Trait for narrow phase (continuous) collision detection.
///
/// Each candidate carries the margin it must keep; a candidate survives if
/// its recorded trajectory brings it within that margin at any time.
///
/// # Implementations
/// - [`ConservativeAdvancement`](crate::ccd::ConservativeAdvancement): distance-bounded root finding
/// - [`NullNarrowPhase`]: reports nothing
pub trait NarrowPhase: Send {
    fn find_collisions(
        &self,
        log: &TrajectoryLog,
        vf: &[(VertexFaceStencil, Scalar)],
        ee: &[(EdgeEdgeStencil, Scalar)],
    ) -> StratumResult<CollisionSet>;

    /// Returns the narrow phase strategy name.
    fn name(&self) -> &str;
}

/// No-op narrow phase for scenes without collision.
pub struct NullNarrowPhase;

impl NarrowPhase for NullNarrowPhase {
    fn find_collisions(
        &self,
        _log: &TrajectoryLog,
        _vf: &[(VertexFaceStencil, Scalar)],
        _ee: &[(EdgeEdgeStencil, Scalar)],
    ) -> StratumResult<CollisionSet> {
        Ok(CollisionSet::default())
    }

    fn name(&self) -> &str {
        "null_narrow_phase"
    }
}
