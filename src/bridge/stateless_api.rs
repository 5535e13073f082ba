// In: src/bridge/stateless_api.rs

//! The stateless convenience API: one-shot resampling with the default
//! policy (fill mode, `fill_value = 0.0`, warnings on, reference backend).
//! Callers who need strict coverage, a custom fill value, or the vectorized
//! backend construct a [`Resampler`] with their own `ResampleConfig`.

use std::fmt::Debug;
use std::sync::Once;

use log::LevelFilter;
use ndarray::{Array, ArrayView, Dimension};
use num_traits::Float;

use crate::error::FluxresError;
use crate::rebin_pipeline::orchestrator::Resampler;

/// Resamples one or more spectra onto `new_wavs`, conserving integrated flux.
///
/// `spec_fluxes`' trailing axis must run over `spec_wavs`; leading axes are
/// independent spectra and are preserved in the output.
pub fn resample<F, D>(
    new_wavs: &[F],
    spec_wavs: &[F],
    spec_fluxes: ArrayView<'_, F, D>,
) -> Result<Array<F, D>, FluxresError>
where
    F: Float + Debug,
    D: Dimension,
{
    let out = Resampler::with_defaults().resample(new_wavs, spec_wavs, spec_fluxes, None)?;
    Ok(out.fluxes)
}

/// Like [`resample`], but also propagates per-sample uncertainties
/// (quadrature combination under an independence assumption).
///
/// `spec_errs` must have the exact same shape as `spec_fluxes`.
pub fn resample_with_errs<F, D>(
    new_wavs: &[F],
    spec_wavs: &[F],
    spec_fluxes: ArrayView<'_, F, D>,
    spec_errs: ArrayView<'_, F, D>,
) -> Result<(Array<F, D>, Array<F, D>), FluxresError>
where
    F: Float + Debug,
    D: Dimension,
{
    let out =
        Resampler::with_defaults().resample(new_wavs, spec_wavs, spec_fluxes, Some(spec_errs))?;
    let errs = out.errs.ok_or_else(|| {
        FluxresError::InternalError("errs were supplied but not propagated".into())
    })?;
    Ok((out.fluxes, errs))
}

static INIT_LOGGER: Once = Once::new();

/// Turns on human-readable logging for the library (coverage warnings, plan
/// diagnostics). Safe to call more than once; only the first call installs
/// the logger. `RUST_LOG` overrides the default `info` level.
pub fn enable_verbose_logging() {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();
        builder.filter_level(LevelFilter::Info);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())
        });

        let _ = builder.try_init();
    });
}
