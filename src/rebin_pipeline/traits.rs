// In: src/rebin_pipeline/traits.rs

//! Defines the behavioral trait for rebinning execution strategies.
//!
//! A backend is a pure executor of a prepared `ResamplePlan`: given one
//! trailing-axis lane of input samples it fully populates the matching output
//! lane. Backends hold no cross-call state and borrow the plan immutably, so
//! the same backend value may be driven over many lanes (or from many
//! threads) without coordination.
//!
//! Both implementations honor the identical numerical contract and accumulate
//! weighted sums in the same left-to-right order, so their outputs agree
//! exactly; the choice is purely an execution-speed trade-off, made once at
//! configuration time via `config::BackendKind`.

use ndarray::{ArrayView1, ArrayViewMut1};
use num_traits::Float;

/// A strategy for executing a `ResamplePlan` over per-spectrum lanes.
pub(crate) trait RebinBackend<F: Float> {
    /// Resamples one flux lane. `out` has one element per target bin and is
    /// fully overwritten, including fill bins.
    fn rebin_flux_lane(&self, flux: ArrayView1<'_, F>, out: ArrayViewMut1<'_, F>);

    /// Propagates one uncertainty lane (quadrature combination; direct copy
    /// for single-source-bin targets; fill value outside coverage).
    fn rebin_error_lane(&self, errs: ArrayView1<'_, F>, out: ArrayViewMut1<'_, F>);
}
