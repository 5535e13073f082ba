// In: src/kernels/aggregate.rs

//! Flux aggregation over an overlap run: the conservation step.
//!
//! Given the run of source bins overlapping one target bin, this kernel
//! computes the width-weighted flux mean (so the integral of flux over
//! wavelength is conserved, not the point values) and, when uncertainties
//! are supplied, their quadrature combination under an independence
//! assumption.
//!
//! The two boundary bins of a run contribute only the fraction of their
//! width that actually falls inside the target bin. Those fractions are
//! applied on the fly; the shared width/geometry arrays are never mutated,
//! so no overlap computation can observe another's boundary scaling.

use num_traits::Float;

use super::geometry::BinGrid;
use super::sweep::OverlapRun;

/// Fraction of each boundary source bin's width that lies inside the target
/// bin. Both values are in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryFactors<F> {
    pub start_factor: F,
    pub end_factor: F,
}

/// Computes the boundary overlap fractions for a run against the target bin
/// `[target_left, target_right]`.
///
/// The overlap is clamped to the source bin, so a target bin sticking out
/// past the source coverage still yields fractions in `(0, 1]` and is
/// averaged over the coverage it actually has.
pub fn boundary_factors<F: Float>(
    source: &BinGrid<F>,
    run: &OverlapRun,
    target_left: F,
    target_right: F,
) -> BoundaryFactors<F> {
    let lo = target_left.max(source.left_edge(run.start));
    let hi = target_right.min(source.right_edge(run.stop));
    BoundaryFactors {
        start_factor: (source.right_edge(run.start) - lo) / source.width(run.start),
        end_factor: (hi - source.left_edge(run.stop)) / source.width(run.stop),
    }
}

/// The width of source bin `k` as seen by the target bin: the full width for
/// interior bins of the run, the overlap-scaled width at the boundaries.
#[inline]
pub fn effective_width<F: Float>(
    source: &BinGrid<F>,
    run: &OverlapRun,
    factors: &BoundaryFactors<F>,
    k: usize,
) -> F {
    let width = source.width(k);
    if k == run.start {
        width * factors.start_factor
    } else if k == run.stop {
        width * factors.end_factor
    } else {
        width
    }
}

/// The conserved flux for one target bin:
/// `sum(eff_width[k] * value(k)) / sum(eff_width[k])` over the run.
///
/// `value` is an accessor so the same kernel serves plain slices and strided
/// ndarray lanes. The engine short-circuits single-bin runs to a direct copy
/// before reaching here; calling this with `run.start == run.stop` would
/// still be numerically correct, just pointless averaging.
pub fn weighted_mean<F: Float>(
    source: &BinGrid<F>,
    run: &OverlapRun,
    factors: &BoundaryFactors<F>,
    mut value: impl FnMut(usize) -> F,
) -> F {
    let mut acc = F::zero();
    let mut weight_sum = F::zero();
    for k in run.start..=run.stop {
        let w = effective_width(source, run, factors, k);
        acc = acc + w * value(k);
        weight_sum = weight_sum + w;
    }
    acc / weight_sum
}

/// The propagated uncertainty for one target bin:
/// `sqrt(sum((eff_width[k] * err(k))^2)) / sum(eff_width[k])`.
///
/// Quadrature combination assumes source uncertainties are statistically
/// independent. Not rigorous for correlated errors, but the accepted
/// approximation in this domain.
pub fn quadrature_error<F: Float>(
    source: &BinGrid<F>,
    run: &OverlapRun,
    factors: &BoundaryFactors<F>,
    mut err: impl FnMut(usize) -> F,
) -> F {
    let mut acc = F::zero();
    let mut weight_sum = F::zero();
    for k in run.start..=run.stop {
        let w = effective_width(source, run, factors, k);
        let weighted = w * err(k);
        acc = acc + weighted * weighted;
        weight_sum = weight_sum + w;
    }
    acc.sqrt() / weight_sum
}
