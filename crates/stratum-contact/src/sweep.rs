//! Sort-and-sweep overlap queries over axis-aligned boxes.
//!
//! Boxes are sorted by their min-X coordinate; each box is then only
//! tested against the boxes whose min-X falls before its max-X.

use stratum_math::Aabb;

/// All pairs `(i, j)` with `i < j` whose boxes overlap, sorted.
pub fn overlapping_pairs(boxes: &[Aabb]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(boxes.len() * 2);
    sweep(boxes, |a, b| pairs.push((a.min(b), a.max(b))));
    pairs.sort_unstable();
    pairs
}

/// All pairs `(l, r)` with `left[l]` overlapping `right[r]`, sorted.
pub fn overlapping_pairs_between(left: &[Aabb], right: &[Aabb]) -> Vec<(usize, usize)> {
    let split = left.len();
    let combined: Vec<Aabb> = left.iter().chain(right).copied().collect();
    let mut pairs = Vec::new();

    sweep(&combined, |a, b| {
        let (lo, hi) = (a.min(b), a.max(b));
        // Same-side pairs are not of interest.
        if lo < split && hi >= split {
            pairs.push((lo, hi - split));
        }
    });

    pairs.sort_unstable();
    pairs
}

fn sweep(boxes: &[Aabb], mut emit: impl FnMut(usize, usize)) {
    debug_assert!(
        boxes.iter().all(Aabb::is_finite),
        "sweep-and-prune requires finite boxes"
    );

    let mut sorted_x: Vec<usize> = (0..boxes.len()).collect();
    // total_cmp keeps the order deterministic even for non-finite input.
    sorted_x.sort_by(|&a, &b| boxes[a].min.x.total_cmp(&boxes[b].min.x));

    for (k, &i) in sorted_x.iter().enumerate() {
        let box_i = &boxes[i];
        for &j in &sorted_x[k + 1..] {
            let box_j = &boxes[j];
            if box_j.min.x > box_i.max.x {
                break;
            }
            if box_i.overlaps(box_j) {
                emit(i, j);
            }
        }
    }
}
