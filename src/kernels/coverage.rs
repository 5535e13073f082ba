// In: src/kernels/coverage.rs

//! Coverage classification between the target and source wavelength ranges.
//!
//! This kernel answers two questions the engine must settle before any flux
//! is touched:
//! 1. How does the target grid's outer range relate to the source grid's
//!    outer range (`classify`)?
//! 2. Which target bins have *any* source overlap (`overlapping_span`)?
//!
//! Zero-width contact is never overlap: a target range that merely touches
//! the source range is `Disjoint`, and a target bin whose edge coincides
//! with the source boundary is outside the span. This matches the tie-break
//! used by the sweep kernel, so shared boundaries are never double-counted.

use std::ops::Range;

use num_traits::Float;

use super::geometry::BinGrid;

/// How the target grid's wavelength range relates to the source grid's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// The target range lies entirely within the source range. Every target
    /// bin can be computed; no padding needed.
    FullyContained,

    /// Some of the target range extends beyond the source range, but overlap
    /// exists. The flags record which side(s) stick out.
    PartiallyOutside { below: bool, above: bool },

    /// No overlap at all (touching ranges included). Always fatal.
    Disjoint,
}

/// Classifies the target grid's coverage against the source grid.
pub fn classify<F: Float>(target: &BinGrid<F>, source: &BinGrid<F>) -> Coverage {
    let (target_left, target_right) = target.span();
    let (source_left, source_right) = source.span();

    if target_right <= source_left || target_left >= source_right {
        return Coverage::Disjoint;
    }

    let below = target_left < source_left;
    let above = target_right > source_right;
    if below || above {
        Coverage::PartiallyOutside { below, above }
    } else {
        Coverage::FullyContained
    }
}

/// The half-open range of target-bin indices with nonzero source overlap.
///
/// Target bins outside this span have no source coverage and must be filled
/// (or rejected, in strict mode) without ever entering the sweep. For a
/// disjoint pair of grids the span is empty.
pub fn overlapping_span<F: Float>(target: &BinGrid<F>, source: &BinGrid<F>) -> Range<usize> {
    let (source_left, source_right) = source.span();
    let n = target.len();

    // Strict inequalities: an edge-touching bin has zero-width overlap and
    // stays outside the span.
    let first = (0..n)
        .find(|&j| target.right_edge(j) > source_left)
        .unwrap_or(n);
    let last = (first..n)
        .take_while(|&j| target.left_edge(j) < source_right)
        .last();

    match last {
        Some(j) => first..j + 1,
        None => first..first,
    }
}
