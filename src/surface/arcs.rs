//! Blocking arcs on one slice circle, and the sort-and-merge that turns them
//! into a total blocked angle.

use std::f64::consts::TAU;

use super::capacity::{ScratchBuffer, ARC_CAPACITY};
use super::error::AccessibilityError;

/// Total angular length covered by a set of arcs `[starts[i], ends[i]]`.
///
/// `order` is overwritten with the permutation that sorts the arcs by start
/// angle. Overlapping and touching arcs are merged, so the result only
/// depends on the arcs as a set, not on their input order.
pub fn merged_length(starts: &[f64], ends: &[f64], order: &mut [usize]) -> f64 {
    debug_assert_eq!(starts.len(), ends.len());
    debug_assert_eq!(starts.len(), order.len());
    if order.is_empty() {
        return 0.0;
    }
    for (i, slot) in order.iter_mut().enumerate() {
        *slot = i;
    }
    order.sort_unstable_by(|&a, &b| starts[a].total_cmp(&starts[b]).then(a.cmp(&b)));

    let mut blocked = 0.0;
    let mut run_start = starts[order[0]];
    let mut run_end = ends[order[0]];
    for &i in &order[1..] {
        if starts[i] > run_end {
            blocked += run_end - run_start;
            run_start = starts[i];
            run_end = ends[i];
        } else if ends[i] > run_end {
            run_end = ends[i];
        }
    }
    blocked + (run_end - run_start)
}

/// Scratch arc storage for one slice, reused across slices and atoms.
#[derive(Debug, Clone)]
pub struct ArcList {
    starts: ScratchBuffer<f64>,
    ends: ScratchBuffer<f64>,
    order: ScratchBuffer<usize>,
}

impl ArcList {
    /// Allocate empty arc storage.
    pub fn new() -> Result<Self, AccessibilityError> {
        Ok(Self {
            starts: ScratchBuffer::with_capacity(ARC_CAPACITY)?,
            ends: ScratchBuffer::with_capacity(ARC_CAPACITY)?,
            order: ScratchBuffer::with_capacity(ARC_CAPACITY)?,
        })
    }

    /// Drop all arcs, keeping the allocation.
    pub fn clear(&mut self) {
        self.starts.clear();
        self.ends.clear();
    }

    /// Number of stored arcs, counting both halves of a split arc.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Whether no arc was added.
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Add a raw arc. Callers must keep `0 <= start <= end <= 2π`.
    pub fn push(&mut self, start: f64, end: f64) -> Result<(), AccessibilityError> {
        self.starts.push(start)?;
        self.ends.push(end)
    }

    /// Add the arc `[bearing - half_width, bearing + half_width]`, with
    /// `bearing` in `[0, 2π]` and `half_width` in `[0, π]`. Arcs crossing
    /// 0 or 2π are split in two.
    pub fn push_centered(&mut self, bearing: f64, half_width: f64) -> Result<(), AccessibilityError> {
        let mut start = bearing - half_width;
        let mut end = bearing + half_width;
        if start < 0.0 {
            start += TAU;
            end += TAU;
        }
        if end > TAU {
            self.push(start, TAU)?;
            self.push(0.0, end - TAU)
        } else {
            self.push(start, end)
        }
    }

    /// Blocked angle of the slice circle, in radians.
    pub fn blocked(&mut self) -> Result<f64, AccessibilityError> {
        self.order.clear();
        for i in 0..self.starts.len() {
            self.order.push(i)?;
        }
        Ok(merged_length(
            self.starts.as_slice(),
            self.ends.as_slice(),
            self.order.as_mut_slice(),
        )
        .min(TAU))
    }
}
