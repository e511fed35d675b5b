//! Event queue over penalty groups.
//!
//! A min-heap on fire time. Ties go to the entry inserted first, which
//! keeps the firing order deterministic even when two layer clocks land
//! on the same instant.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use stratum_types::Scalar;

#[derive(Debug, Clone, Copy)]
struct Event {
    time: Scalar,
    seq: u64,
    group: usize,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    // Reversed: `BinaryHeap` is a max-heap and the earliest event must win.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority queue of group indices keyed by next fire time.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Event>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `group` to fire at `time`.
    pub fn push(&mut self, time: Scalar, group: usize) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Event { time, seq, group });
    }

    /// Earliest `(time, group)` without removing it.
    pub fn peek(&self) -> Option<(Scalar, usize)> {
        self.heap.peek().map(|e| (e.time, e.group))
    }

    /// Remove and return the earliest `(time, group)`.
    pub fn pop(&mut self) -> Option<(Scalar, usize)> {
        self.heap.pop().map(|e| (e.time, e.group))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Re-sort every queued group after their clocks changed. Groups are
    /// re-inserted in index order, so equal times fire lowest index first.
    pub fn rebuild(&mut self, fire_time: impl Fn(usize) -> Scalar) {
        let mut groups: Vec<usize> = self.heap.drain().map(|e| e.group).collect();
        groups.sort_unstable();
        for group in groups {
            self.push(fire_time(group), group);
        }
    }
}
