// In: src/rebin_pipeline/orchestrator.rs

//! The top-level resampling orchestrator.
//!
//! `Resampler` acts as a pure coordinator: it validates the input arrays
//! against the grids, delegates the geometric analysis to the planner,
//! applies the coverage policy, and drives the configured backend across
//! every trailing-axis lane of the (possibly batched) flux array.
//!
//! All state is per-call; a `Resampler` holds only its shared, read-only
//! configuration and may be used concurrently from multiple threads.

use std::fmt::Debug;
use std::sync::Arc;

use log::{debug, warn};
use ndarray::{Array, ArrayView, Axis, Dimension, Zip};
use num_traits::Float;

use crate::config::{BackendKind, ResampleConfig};
use crate::error::FluxresError;
use crate::kernels::coverage::Coverage;

use super::plan::ResamplePlan;
use super::reference::ReferenceBackend;
use super::traits::RebinBackend;
use super::vectorized::VectorizedBackend;

/// The result of one resampling call: fluxes on the target grid, plus
/// propagated uncertainties when they were supplied.
#[derive(Debug, Clone)]
pub struct ResampledSpectra<F, D: Dimension> {
    pub fluxes: Array<F, D>,
    pub errs: Option<Array<F, D>>,
}

/// The configurable entry point of the rebinning engine.
pub struct Resampler {
    config: Arc<ResampleConfig>,
}

impl Resampler {
    pub fn new(config: Arc<ResampleConfig>) -> Self {
        Self { config }
    }

    /// A resampler with the default policy: fill mode, `fill_value = 0.0`,
    /// warnings enabled, reference backend.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(ResampleConfig::default()))
    }

    /// Resamples a batch of co-sampled spectra onto a new wavelength grid,
    /// conserving integrated flux.
    ///
    /// * `new_wavs` / `spec_wavs`: strictly increasing center wavelengths
    ///   (>= 2 points each) of the target and source grids.
    /// * `spec_fluxes`: flux array whose trailing axis runs over `spec_wavs`;
    ///   any leading axes are independent spectra.
    /// * `spec_errs`: optional per-sample uncertainties, exact same shape as
    ///   `spec_fluxes`, assumed statistically independent between bins.
    ///
    /// On success the output trailing axis has `new_wavs.len()` elements and
    /// all leading axes are unchanged. Errors abort with no partial output.
    pub fn resample<F, D>(
        &self,
        new_wavs: &[F],
        spec_wavs: &[F],
        spec_fluxes: ArrayView<'_, F, D>,
        spec_errs: Option<ArrayView<'_, F, D>>,
    ) -> Result<ResampledSpectra<F, D>, FluxresError>
    where
        F: Float + Debug,
        D: Dimension,
    {
        // 1. Shape gate. A malformed shape makes any computed geometry
        // meaningless, so these fail before anything is planned.
        let ndim = spec_fluxes.ndim();
        if ndim == 0 {
            return Err(FluxresError::ShapeMismatch(
                "flux array must have at least one axis (the wavelength axis)".into(),
            ));
        }
        if spec_fluxes.shape()[ndim - 1] != spec_wavs.len() {
            return Err(FluxresError::ShapeMismatch(format!(
                "flux trailing axis has {} samples but the source grid has {} wavelengths",
                spec_fluxes.shape()[ndim - 1],
                spec_wavs.len()
            )));
        }
        if let Some(errs) = &spec_errs {
            if errs.shape() != spec_fluxes.shape() {
                return Err(FluxresError::ShapeMismatch(format!(
                    "errs shape {:?} must equal flux shape {:?}",
                    errs.shape(),
                    spec_fluxes.shape()
                )));
            }
        }

        let fill_value = F::from(self.config.fill_value).ok_or_else(|| {
            FluxresError::InternalError(format!(
                "fill_value {} is not representable in the sample type",
                self.config.fill_value
            ))
        })?;

        // 2. Plan: geometry, coverage gate, one task per target bin.
        let plan = ResamplePlan::build(new_wavs, spec_wavs, self.config.coverage, fill_value)?;

        // 3. Non-fatal coverage warning, once per call.
        if let Coverage::PartiallyOutside { below, above } = plan.coverage {
            if !self.config.silence_warnings {
                let side = match (below, above) {
                    (true, true) => "both ends",
                    (true, false) => "the blue end",
                    (false, true) => "the red end",
                    (false, false) => "neither end",
                };
                warn!(
                    "target grid extends beyond source coverage at {side}; \
                     {} of {} output bins filled with {:?}",
                    plan.filled_bins(),
                    plan.tasks.len(),
                    fill_value
                );
            }
        }
        debug!(
            "resampling plan: {} source bins -> {} target bins ({} filled), backend {:?}",
            plan.source.len(),
            plan.tasks.len(),
            plan.filled_bins(),
            self.config.backend
        );

        // 4. Select the execution strategy.
        let backend: Box<dyn RebinBackend<F> + '_> = match self.config.backend {
            BackendKind::Reference => Box::new(ReferenceBackend::new(&plan)),
            BackendKind::Vectorized => Box::new(VectorizedBackend::from_plan(&plan)),
        };

        // 5. Execute over every trailing-axis lane of the batch.
        let axis = Axis(ndim - 1);
        let mut out_dim = spec_fluxes.raw_dim();
        out_dim.slice_mut()[ndim - 1] = plan.target.len();

        let mut fluxes = Array::from_elem(out_dim.clone(), fill_value);
        Zip::from(fluxes.lanes_mut(axis))
            .and(spec_fluxes.lanes(axis))
            .for_each(|out_lane, flux_lane| backend.rebin_flux_lane(flux_lane, out_lane));

        let errs = match spec_errs {
            Some(errs_in) => {
                let mut errs_out = Array::from_elem(out_dim, fill_value);
                Zip::from(errs_out.lanes_mut(axis))
                    .and(errs_in.lanes(axis))
                    .for_each(|out_lane, err_lane| backend.rebin_error_lane(err_lane, out_lane));
                Some(errs_out)
            }
            None => None,
        };

        Ok(ResampledSpectra { fluxes, errs })
    }
}
