// In: src/rebin_pipeline/reference.rs

//! The reference rebinning backend.
//!
//! Evaluates each `BinTask` directly against the aggregation kernels, with no
//! per-call scratch memory. This is the semantic baseline the vectorized
//! backend is validated against, and the right default for single spectra.

use ndarray::{ArrayView1, ArrayViewMut1};
use num_traits::Float;

use crate::kernels::aggregate::{quadrature_error, weighted_mean};

use super::plan::{BinTask, ResamplePlan};
use super::traits::RebinBackend;

pub(crate) struct ReferenceBackend<'p, F> {
    plan: &'p ResamplePlan<F>,
}

impl<'p, F: Float> ReferenceBackend<'p, F> {
    pub fn new(plan: &'p ResamplePlan<F>) -> Self {
        Self { plan }
    }
}

impl<F: Float> RebinBackend<F> for ReferenceBackend<'_, F> {
    fn rebin_flux_lane(&self, flux: ArrayView1<'_, F>, mut out: ArrayViewMut1<'_, F>) {
        for (j, task) in self.plan.tasks.iter().enumerate() {
            out[j] = match task {
                BinTask::Fill => self.plan.fill_value,
                BinTask::Copy { src } => flux[*src],
                BinTask::Blend { run, factors } => {
                    weighted_mean(&self.plan.source, run, factors, |k| flux[k])
                }
            };
        }
    }

    fn rebin_error_lane(&self, errs: ArrayView1<'_, F>, mut out: ArrayViewMut1<'_, F>) {
        for (j, task) in self.plan.tasks.iter().enumerate() {
            out[j] = match task {
                BinTask::Fill => self.plan.fill_value,
                BinTask::Copy { src } => errs[*src],
                BinTask::Blend { run, factors } => {
                    quadrature_error(&self.plan.source, run, factors, |k| errs[k])
                }
            };
        }
    }
}
