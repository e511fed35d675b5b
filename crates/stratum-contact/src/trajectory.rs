//! Per-iteration trajectory log.
//!
//! Records, for every vertex, the `(time, position)` samples at which its
//! velocity changed during one outer iteration. Between consecutive samples
//! a vertex moves with constant velocity, so the piecewise-linear
//! interpolation of the samples is the exact trajectory the continuous
//! collision queries must examine.

use stratum_math::{Aabb, DVec3};
use stratum_types::Scalar;

/// One position sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: Scalar,
    pub position: DVec3,
}

/// Piecewise-linear trajectories of all mesh vertices over one interval.
#[derive(Debug, Clone)]
pub struct TrajectoryLog {
    samples: Vec<Vec<Sample>>,
    entries: usize,
    start_time: Scalar,
    end_time: Option<Scalar>,
}

impl TrajectoryLog {
    /// Starts a log at time 0 from interleaved positions `q`.
    pub fn new(q: &[Scalar]) -> Self {
        Self::starting_at(q, 0.0)
    }

    /// Starts a log at `start_time` from interleaved positions `q`.
    pub fn starting_at(q: &[Scalar], start_time: Scalar) -> Self {
        let samples = q
            .chunks_exact(3)
            .map(|c| {
                vec![Sample {
                    time: start_time,
                    position: DVec3::new(c[0], c[1], c[2]),
                }]
            })
            .collect();
        Self {
            samples,
            entries: 0,
            start_time,
            end_time: None,
        }
    }

    /// A finalized log holding a single instant: every vertex rests at `q`.
    pub fn stationary(q: &[Scalar]) -> Self {
        let mut log = Self::new(q);
        log.finalize(q, 0.0);
        log
    }

    /// Records that `vertex` was at `position` at `time`.
    pub fn add_entry(&mut self, vertex: usize, time: Scalar, position: DVec3) {
        let track = &mut self.samples[vertex];
        debug_assert!(
            track.last().map_or(true, |s| s.time <= time),
            "trajectory samples must be appended in time order"
        );
        track.push(Sample { time, position });
        self.entries += 1;
    }

    /// Closes the log at `end_time` with every vertex at its final position.
    pub fn finalize(&mut self, q: &[Scalar], end_time: Scalar) {
        for (track, c) in self.samples.iter_mut().zip(q.chunks_exact(3)) {
            let position = DVec3::new(c[0], c[1], c[2]);
            match track.last_mut() {
                Some(last) if last.time >= end_time => last.position = position,
                _ => track.push(Sample {
                    time: end_time,
                    position,
                }),
            }
        }
        self.end_time = Some(end_time);
    }

    /// Number of entries recorded through [`add_entry`](Self::add_entry).
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.entries
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn start_time(&self) -> Scalar {
        self.start_time
    }

    /// End of the logged interval, once finalized.
    #[inline]
    pub fn end_time(&self) -> Option<Scalar> {
        self.end_time
    }

    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.end_time.is_some()
    }

    /// All samples of `vertex` in time order.
    #[inline]
    pub fn samples(&self, vertex: usize) -> &[Sample] {
        &self.samples[vertex]
    }

    /// Interpolated position of `vertex` at `time`, clamped to the logged range.
    pub fn position_at(&self, vertex: usize, time: Scalar) -> DVec3 {
        let track = &self.samples[vertex];
        // First sample strictly after `time`.
        let after = track.partition_point(|s| s.time <= time);
        if after == 0 {
            return track[0].position;
        }
        if after == track.len() {
            return track[after - 1].position;
        }
        let a = track[after - 1];
        let b = track[after];
        let span = b.time - a.time;
        if span <= 0.0 {
            return b.position;
        }
        a.position.lerp(b.position, (time - a.time) / span)
    }

    /// Merged, deduplicated sample times of `vertices`. Over each interval
    /// between consecutive breakpoints all of them move linearly.
    pub fn breakpoints(&self, vertices: &[u32]) -> Vec<Scalar> {
        let mut times: Vec<Scalar> = vertices
            .iter()
            .flat_map(|&v| self.samples[v as usize].iter().map(|s| s.time))
            .collect();
        times.sort_by(|a, b| a.total_cmp(b));
        times.dedup();
        times
    }

    /// Bounding box of every position `vertex` passes through.
    pub fn swept_bounds(&self, vertex: usize) -> Aabb {
        Aabb::from_points(self.samples[vertex].iter().map(|s| s.position))
    }
}
