// In: src/kernels/sweep.rs

//! The two-pointer overlap sweep over the source grid.
//!
//! For each target bin (visited in ascending wavelength order) the sweeper
//! reports the contiguous run of source bins with nonzero overlap. Because
//! both grids are sorted by left edge, the `start` and `stop` cursors only
//! ever move forward across the whole sweep, which makes the total cost
//! linear in the combined number of source and target bins instead of
//! quadratic.
//!
//! Tie-break: a source bin whose right edge exactly equals the target bin's
//! left edge contributes zero width and is *not* part of the run. This keeps
//! flux at shared boundaries from being counted twice.

use num_traits::Float;

use super::geometry::BinGrid;

/// The inclusive run `[start, stop]` of source-bin indices overlapping one
/// target bin. `start == stop` means the target bin lies entirely inside a
/// single source bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapRun {
    pub start: usize,
    pub stop: usize,
}

impl OverlapRun {
    /// The number of source bins in the run.
    pub fn len(&self) -> usize {
        self.stop - self.start + 1
    }

    /// A run always contains at least one source bin.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Stateful forward-only sweeper over one source grid.
///
/// Feed it target bins in ascending order via [`OverlapSweeper::run_for`];
/// the cursors persist between calls, which is where the linear complexity
/// comes from.
#[derive(Debug)]
pub struct OverlapSweeper<'a, F> {
    source: &'a BinGrid<F>,
    start: usize,
    stop: usize,
}

impl<'a, F: Float> OverlapSweeper<'a, F> {
    pub fn new(source: &'a BinGrid<F>) -> Self {
        Self {
            source,
            start: 0,
            stop: 0,
        }
    }

    /// Returns the run of source bins overlapping the target bin
    /// `[target_left, target_right]`.
    ///
    /// The caller must guarantee the target bin has nonzero overlap with the
    /// source coverage (the engine enforces this via `coverage::overlapping_span`)
    /// and that successive calls use non-decreasing target edges.
    pub fn run_for(&mut self, target_left: F, target_right: F) -> OverlapRun {
        debug_assert!(target_left < target_right, "target bin must have width");
        let last = self.source.len() - 1;

        // Skip source bins entirely left of the target bin. `<=` drops the
        // zero-width touch at the shared edge.
        while self.start < last && self.source.right_edge(self.start) <= target_left {
            self.start += 1;
        }

        // Extend to the last source bin reaching into the target bin. Strict
        // `<` keeps a bin whose right edge lands exactly on `target_right`
        // as the final member, and never admits its zero-width neighbor.
        if self.stop < self.start {
            self.stop = self.start;
        }
        while self.stop < last && self.source.right_edge(self.stop) < target_right {
            self.stop += 1;
        }

        OverlapRun {
            start: self.start,
            stop: self.stop,
        }
    }
}
